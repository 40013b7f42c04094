use actix_web::{test, web, App};
use chrono::NaiveDate;
use planificador::models::{CalendarioFeriados, Feriado, TipoFeriado};
use planificador::server::{configurar_rutas, EstadoApp};
use serde_json::json;

fn estado() -> web::Data<EstadoApp> {
    let fecha = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    web::Data::new(EstadoApp::new(CalendarioFeriados::new(vec![Feriado::new(
        fecha,
        "Día de Todos los Santos",
        TipoFeriado::Nacional,
    )])))
}

#[actix_web::test]
async fn test_preview_marca_feriado_y_conflicto() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let body = json!({
        "patrones": [{
            "patron": {"fecha_inicio": "2024-11-01", "fecha_fin": "2024-11-30", "dias_semana": [5]},
            "plantilla": {"hora_inicio": "08:30", "hora_fin": "10:00", "curso": "CIT3313", "grupo": "01", "docente": "doc-17", "sala": "B-204"}
        }],
        "compromisos": {
            "salas": [{"recurso": "B-204", "nombre": "Sala B-204", "fecha": "2024-11-08", "hora_inicio": "09:00", "hora_fin": "11:00"}]
        }
    });
    let req = test::TestRequest::post().uri("/preview").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let v: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(v["resumen"]["total"], 5);
    assert_eq!(v["resumen"]["feriado"], 1);
    assert_eq!(v["resumen"]["conflicto"], 1);
    assert_eq!(v["sesiones"][0]["estado"], "feriado");
    assert_eq!(v["sesiones"][1]["estado"], "conflicto");
    assert_eq!(v["sesiones"][1]["motivo"], "sala Sala B-204 ocupada 09:00-11:00");
}

#[actix_web::test]
async fn test_preview_entrada_invalida_da_400() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;

    // rango invertido
    let body = json!({
        "patrones": [{
            "patron": {"fecha_inicio": "2024-12-01", "fecha_fin": "2024-11-01", "dias_semana": [5]},
            "plantilla": {"hora_inicio": "08:30", "hora_fin": "10:00", "curso": "CIT3313", "grupo": "01"}
        }]
    });
    let req = test::TestRequest::post().uri("/preview").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let v: serde_json::Value = test::read_body_json(resp).await;
    assert!(v["error"].as_str().unwrap_or("").contains("rango de fechas"));

    // falta `patrones`
    let req = test::TestRequest::post().uri("/preview").set_json(json!({})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_preview_rango_demasiado_largo_da_400() {
    let estado = web::Data::new(EstadoApp::new(CalendarioFeriados::default()).con_max_dias(31));
    let app = test::init_service(App::new().app_data(estado).configure(configurar_rutas)).await;
    let body = json!({
        "patrones": [{
            "patron": {"fecha_inicio": "2024-01-01", "fecha_fin": "2024-12-31", "dias_semana": [1, 3]},
            "plantilla": {"hora_inicio": "08:30", "hora_fin": "10:00", "curso": "MAT101", "grupo": "A"}
        }]
    });
    let req = test::TestRequest::post().uri("/preview").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let v: serde_json::Value = test::read_body_json(resp).await;
    assert!(v["error"].as_str().unwrap_or("").contains("366 días excede el máximo permitido de 31"));

    // un mes completo sí entra
    let body = json!({
        "patrones": [{
            "patron": {"fecha_inicio": "2024-11-01", "fecha_fin": "2024-11-30", "dias_semana": [5]},
            "plantilla": {"hora_inicio": "08:30", "hora_fin": "10:00", "curso": "MAT101", "grupo": "A"}
        }]
    });
    let req = test::TestRequest::post().uri("/preview").set_json(&body).to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
}

#[actix_web::test]
async fn test_preview_rango_de_todo_el_calendario_se_rechaza_sin_expandir() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let body = json!({
        "patrones": [{
            "patron": {"fecha_inicio": "0001-01-01", "fecha_fin": "+262142-12-31", "dias_semana": [0, 1, 2, 3, 4, 5, 6]},
            "plantilla": {"hora_inicio": "08:30", "hora_fin": "10:00", "curso": "MAT101", "grupo": "A"}
        }]
    });
    let req = test::TestRequest::post().uri("/preview").set_json(&body).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_calendario_fuera_de_rango_da_400() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let req = test::TestRequest::post()
        .uri("/calendario")
        .set_json(json!({"fecha": "+262143-12-15"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let v: serde_json::Value = test::read_body_json(resp).await;
    assert!(v["error"].as_str().unwrap_or("").contains("fuera del rango"));
}

#[actix_web::test]
async fn test_calendario() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let body = json!({
        "fecha": "2024-11-20",
        "sesiones": [{"fecha": "2024-11-08", "hora_inicio": "08:30", "hora_fin": "10:00", "curso": "MAT101", "grupo": "A"}]
    });
    let req = test::TestRequest::post().uri("/calendario").set_json(&body).to_request();
    let v: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(v["mes"], 11);
    assert_eq!(v["celdas"].as_array().map(|c| c.len()), Some(42));
    assert_eq!(v["celdas"][0]["fecha"], "2024-10-27");
    // 8 de noviembre es la celda 12
    assert_eq!(v["celdas"][12]["sesiones"][0]["curso"], "MAT101");
}

#[actix_web::test]
async fn test_feriados_y_help() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;

    let req = test::TestRequest::get().uri("/feriados").to_request();
    let v: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(v["total"], 1);
    assert_eq!(v["feriados"][0]["nombre"], "Día de Todos los Santos");

    let req = test::TestRequest::get().uri("/help").to_request();
    let v: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(v["post_preview_example"]["patrones"].is_array());
}
