use actix_web::{middleware, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use failure::ResultExt;
use std::net::SocketAddr;
use structopt::StructOpt;
use trivia::{api, DbPool};

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, default_value = "0.0.0.0:5000")]
    bind: SocketAddr,
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: String,
    #[structopt(long, env = "POOL_SIZE", default_value = "10")]
    pool_size: u32,
}

#[actix_rt::main]
async fn main() -> Result<(), exitfailure::ExitFailure> {
    let _ = dotenv::dotenv();
    env_logger::init();
    let args = Args::from_args();

    let cm = ConnectionManager::new(&args.database_url);
    let pool = DbPool::builder()
        .max_size(args.pool_size)
        .build(cm)
        .context("unable to connect database")?;

    log::info!("listening on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .app_data(api::json_config())
            .app_data(api::path_config())
            .app_data(api::query_config())
            .configure(api::configure)
            .default_service(web::route().to(api::not_found))
            .wrap(api::cors())
            .wrap(middleware::Logger::default())
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
