mod errors;
mod handlers;
mod initialization;
mod languages;
mod logging;
mod manager_forecast;
mod manager_owm;

use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::{forecast, list_languages, weather};
use crate::initialization::{config, ForecastConfig};
use crate::manager_owm::Owm;

struct AppState {
    owm: Owm,
    forecast: ForecastConfig,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    let owm = Owm::new(&config.owm.base_url, &config.owm.api_key, config.owm.timeout)?;

    let state = web::Data::new(AppState { owm, forecast: config.forecast });

    info!("starting web server on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(forecast)
            .service(weather)
            .service(list_languages)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
