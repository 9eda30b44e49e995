pub mod admin;
pub mod auth;
pub mod health;
pub mod todos;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(web::scope("/admin").service(admin::list_all_todos))
        .service(
            web::scope("/todo")
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        )
        .service(todos::list_todos);
}
