use super::*;
use actix_web::{
  http::{header::ContentType, StatusCode},
  test,
};
use tempfile::tempdir;

fn open_engine(dir: &tempfile::TempDir) -> Arc<Engine> {
  let mut opts = Options::default();
  opts.dir_path = dir.path().to_path_buf();
  Arc::new(Engine::open(opts).unwrap())
}

#[actix_web::test]
async fn test_put_handler() {
  let temp_dir = tempdir().expect("Failed to create temp dir for put test");
  let engine = open_engine(&temp_dir);

  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(engine.clone()))
      .app_data(json_config())
      .service(put_handler),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/put")
    .set_json(json!({"key": "test", "value": "test value"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(engine.get("test").unwrap(), vec!["test value".to_string()]);

  let req = test::TestRequest::post()
    .uri("/put")
    .insert_header(ContentType::json())
    .set_payload("{\"key\": \"test\"")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // empty keys are stored like any other
  let req = test::TestRequest::post()
    .uri("/put")
    .set_json(json!({"key": "", "value": "v"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(engine.get("").unwrap(), vec!["v".to_string()]);

  // no content type
  let req = test::TestRequest::post()
    .uri("/put")
    .set_payload("{\"key\": \"plain\", \"value\": \"body\"}")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(engine.get("plain").unwrap(), vec!["body".to_string()]);
}

#[actix_web::test]
async fn test_get_handler() {
  let temp_dir = tempdir().expect("Failed to create temp dir for get test");
  let engine = open_engine(&temp_dir);

  engine.put("test", "v1").unwrap();
  engine.put("test", "v2").unwrap();

  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(engine.clone()))
      .service(get_handler),
  )
  .await;

  let req = test::TestRequest::get().uri("/get?key=test").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let values: Vec<String> = test::read_body_json(resp).await;
  assert_eq!(values, vec!["v1".to_string(), "v2".to_string()]);

  let req = test::TestRequest::get().uri("/get?key=missing").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::get().uri("/get").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::get().uri("/get?key=").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_stat_handler() {
  let temp_dir = tempdir().expect("Failed to create temp dir for stat test");
  let engine = open_engine(&temp_dir);
  engine.put("key1", "val1").unwrap();
  engine.put("key2", "val2").unwrap();

  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(engine.clone()))
      .service(stat_handler),
  )
  .await;

  let req = test::TestRequest::get().uri("/stat").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let stat: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(stat["key_num"], 2);
  assert_eq!(stat["data_file_num"], 1);
}
