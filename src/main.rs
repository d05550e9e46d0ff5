mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod request;
mod response;

use actix_web::web::{delete, get, post, put, scope, Data};
use actix_web::HttpServer;

use database::memory::{EditorSessions, MemoryStore};
use impls::summarizer::genai::GenAi;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "actix_web=info,surveyspark=info");
    }
    env_logger::init();
    let store = MemoryStore::seeded();
    let sessions = EditorSessions::default();
    let genai = GenAi::from_env().expect("summarizer configuration");
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(sessions.clone()))
            .app_data(Data::new(genai.clone()))
            .service(
                scope("editors")
                    .route("", post().to(handlers::editor::create))
                    .service(
                        scope("{editor_id}")
                            .route("", get().to(handlers::editor::detail))
                            .route("", put().to(handlers::editor::update_details))
                            .route("save", post().to(handlers::editor::save))
                            .service(
                                scope("questions")
                                    .route("", post().to(handlers::editor::add_question))
                                    .service(
                                        scope("{index}")
                                            .route("", put().to(handlers::editor::update_question))
                                            .route("", delete().to(handlers::editor::remove_question))
                                            .route("move/{to}", post().to(handlers::editor::move_question))
                                            .service(
                                                scope("options")
                                                    .route("", post().to(handlers::editor::add_option))
                                                    .route("{opt_index}", put().to(handlers::editor::update_option))
                                                    .route("{opt_index}", delete().to(handlers::editor::remove_option)),
                                            ),
                                    ),
                            )
                            .service(
                                scope("privacy")
                                    .route("", post().to(handlers::editor::enable_privacy))
                                    .route("", put().to(handlers::editor::set_privacy)),
                            ),
                    ),
            )
            .service(
                scope("surveys")
                    .route("", post().to(handlers::survey::create))
                    .route("", get().to(handlers::survey::list))
                    .service(
                        scope("{survey_id}")
                            .route("", get().to(handlers::survey::detail))
                            .route("", put().to(handlers::survey::update))
                            .route("", delete().to(handlers::survey::delete_survey))
                            .route("activate", post().to(handlers::survey::activate))
                            .route("close", post().to(handlers::survey::close))
                            .route("edit", post().to(handlers::editor::open_survey))
                            .route("summary", post().to(handlers::summary::summarize::<GenAi>))
                            .service(
                                scope("responses")
                                    .route("", post().to(handlers::response::submit))
                                    .route("", get().to(handlers::response::list_by_survey)),
                            ),
                    ),
            )
            .service(
                scope("responses")
                    .route("", get().to(handlers::reward::list))
                    .route("verify", post().to(handlers::reward::verify))
                    .service(
                        scope("rewards")
                            .route("issue", post().to(handlers::reward::issue))
                            .route("ineligible", post().to(handlers::reward::mark_not_eligible)),
                    ),
            )
    })
    .bind(("0.0.0.0", 8000))?
    .run()
    .await
}
