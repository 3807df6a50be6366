use std::{env, io, path::PathBuf, sync::Arc};

use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use segcask::{db::Engine, errors::Errors, option::Options};
use serde::Deserialize;
use serde_json::json;

#[cfg(test)]
mod test;

const DEFAULT_DATA_DIR: &str = "data/";
const DEFAULT_ADDR: &str = "127.0.0.1:8081";

#[derive(Deserialize)]
struct PutRequest {
  key: String,
  value: String,
}

#[derive(Deserialize)]
struct GetParams {
  key: Option<String>,
}

/// Bodies are decoded as JSON whatever their content type.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().content_type_required(false)
}

#[post("/put")]
async fn put_handler(eng: web::Data<Arc<Engine>>, data: web::Json<PutRequest>) -> impl Responder {
  match eng.put(&data.key, &data.value) {
    Ok(()) => HttpResponse::Ok().body("Key-Value stored successfully\n"),
    Err(e) => {
      error!("failed to put key {}: {}", data.key, e);
      HttpResponse::InternalServerError().body("Failed to store key-value")
    }
  }
}

#[get("/get")]
async fn get_handler(eng: web::Data<Arc<Engine>>, params: web::Query<GetParams>) -> impl Responder {
  let key = match params.key.as_deref() {
    Some(key) if !key.is_empty() => key,
    _ => return HttpResponse::BadRequest().body("Missing key parameter"),
  };

  match eng.get(key) {
    Ok(values) => HttpResponse::Ok().json(values),
    Err(Errors::KeyNotFound) => HttpResponse::NotFound().body("Key not found"),
    Err(e) => {
      error!("failed to get key {}: {}", key, e);
      HttpResponse::InternalServerError().body("Failed to read key")
    }
  }
}

#[get("/stat")]
async fn stat_handler(eng: web::Data<Arc<Engine>>) -> impl Responder {
  match eng.get_engine_stat() {
    Ok(stat) => HttpResponse::Ok().json(json!({
      "key_num": stat.key_num,
      "data_file_num": stat.data_file_num,
      "disk_size": stat.disk_size,
    })),
    Err(e) => {
      error!("failed to get engine stat: {}", e);
      HttpResponse::InternalServerError().body("Failed to get engine stat")
    }
  }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut opts = Options::default();
  opts.dir_path = PathBuf::from(env::var("SEGCASK_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()));
  let addr = env::var("SEGCASK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

  let engine = match Engine::open(opts) {
    Ok(engine) => Arc::new(engine),
    Err(e) => {
      error!("failed to open segcask engine: {}", e);
      return Err(io::Error::new(io::ErrorKind::Other, e));
    }
  };

  info!("Server running on {}", addr);
  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(engine.clone()))
      .app_data(json_config())
      .service(put_handler)
      .service(get_handler)
      .service(stat_handler)
  })
  .bind(addr)?
  .run()
  .await
}
