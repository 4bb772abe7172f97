use std::net::TcpListener;
use std::sync::Arc;

use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::auth::AuthGateway;
use crate::configuration::{JwtSettings, Platform};
use crate::middleware::{CountHits, FileserverHits};
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login,
    metrics, refresh, reset, revoke, update_user,
};
use crate::store::Store;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn Store>,
    jwt_config: JwtSettings,
    platform: Platform,
) -> Result<Server, std::io::Error> {
    let gateway = web::Data::new(AuthGateway::new(store.clone(), jwt_config));
    let store: web::Data<dyn Store> = web::Data::from(store);
    let hits = FileserverHits::new();
    let hits_data = web::Data::new(hits.clone());
    let platform = web::Data::new(platform);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())

            // Shared state
            .app_data(gateway.clone())
            .app_data(store.clone())
            .app_data(hits_data.clone())
            .app_data(platform.clone())

            .route("/api/healthz", web::get().to(health_check))
            .route("/api/users", web::post().to(create_user))
            .route("/api/users", web::put().to(update_user))
            .route("/api/login", web::post().to(login))
            .route("/api/refresh", web::post().to(refresh))
            .route("/api/revoke", web::post().to(revoke))
            .route("/api/chirps", web::post().to(create_chirp))
            .route("/api/chirps", web::get().to(list_chirps))
            .route("/api/chirps/{chirp_id}", web::get().to(get_chirp))
            .route("/api/chirps/{chirp_id}", web::delete().to(delete_chirp))

            .route("/admin/metrics", web::get().to(metrics))
            .route("/admin/reset", web::post().to(reset))

            // Static site; every request under /app counts as a visit
            .service(
                web::scope("/app")
                    .wrap(CountHits::new(hits.clone()))
                    .service(fs::Files::new("/", "./public").index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
