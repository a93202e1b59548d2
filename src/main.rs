mod client;
mod model;

#[cfg(feature = "server")]
mod server;

use client::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{config::Config, startup};

        dotenvy::dotenv().ok();
        let config = Config::from_env()?;

        let db = startup::connect_to_database(&config).await?;
        let session = startup::connect_to_session(&db, &config).await?;
        let http_client = startup::setup_reqwest_client()?;
        let state = startup::build_state(&config, &db, http_client)?;

        tracing::info!(
            "Starting server with the {} settings store",
            state.store.name()
        );

        let mut router = dioxus::server::router(App);
        let server_routes = server::router::router().with_state(state).layer(session);
        router = router.merge(server_routes);

        Ok(router)
    })
}
