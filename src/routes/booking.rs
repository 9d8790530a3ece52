use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, ResponseError, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::confirmation::ConfirmationView;
use crate::booking::state::FormView;
use crate::booking::{BookingController, SelectionError, SubmitError};
use crate::client::ApiClient;
use crate::handlers::services::service_catalog;
use crate::handlers::sessions::{find_session, open_session};
use crate::models::booking::DraftPatch;
use crate::models::branch::BranchId;

#[derive(Debug, Error)]
enum BookingRouteError {
    #[error("booking session not found")]
    SessionNotFound,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl ResponseError for BookingRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingRouteError::SessionNotFound => StatusCode::NOT_FOUND,
            BookingRouteError::Selection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingRouteError::Submit(e) => match e {
                SubmitError::InFlight => StatusCode::TOO_MANY_REQUESTS,
                SubmitError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SubmitError::Conflict => StatusCode::CONFLICT,
                SubmitError::Backend(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            BookingRouteError::Submit(e) => match e {
                SubmitError::Invalid(fields) => {
                    json!({ "error": e.user_message(), "fields": fields })
                }
                _ => json!({ "error": e.user_message() }),
            },
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

type RouteResult = Result<HttpResponse, BookingRouteError>;

async fn session(id: Uuid) -> Result<Arc<BookingController>, BookingRouteError> {
    find_session(id)
        .await
        .ok_or(BookingRouteError::SessionNotFound)
}

#[derive(Serialize)]
struct SessionOpened {
    session_id: Uuid,
    form: FormView,
}

#[derive(Serialize)]
struct BookingAccepted {
    confirmation: ConfirmationView,
    form: FormView,
}

#[derive(Deserialize)]
struct BranchChoice {
    branch_id: Option<BranchId>,
}

#[derive(Deserialize)]
struct DateChoice {
    date: Option<String>,
}

#[derive(Deserialize)]
struct TimeChoice {
    time: Option<String>,
}

#[get("/services")]
async fn services() -> impl Responder {
    HttpResponse::Ok().json(service_catalog())
}

#[post("/sessions")]
async fn open(api: web::Data<ApiClient>) -> impl Responder {
    let (session_id, controller) = open_session(api.get_ref()).await;
    HttpResponse::Created().json(SessionOpened {
        session_id,
        form: controller.view().await,
    })
}

#[get("/sessions/{id}")]
async fn show(path: web::Path<Uuid>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[patch("/sessions/{id}/draft")]
async fn edit(path: web::Path<Uuid>, body: web::Json<DraftPatch>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.edit(body.into_inner()).await;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[put("/sessions/{id}/branch")]
async fn select_branch(path: web::Path<Uuid>, body: web::Json<BranchChoice>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.select_branch(body.into_inner().branch_id).await;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[put("/sessions/{id}/date")]
async fn select_date(path: web::Path<Uuid>, body: web::Json<DateChoice>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.select_date(body.into_inner().date).await?;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[put("/sessions/{id}/time")]
async fn select_time(path: web::Path<Uuid>, body: web::Json<TimeChoice>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.select_time(body.into_inner().time).await?;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[post("/sessions/{id}/submit")]
async fn submit(path: web::Path<Uuid>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    let confirmation = controller.submit().await?;
    Ok(HttpResponse::Ok().json(BookingAccepted {
        confirmation: ConfirmationView::from(&confirmation),
        form: controller.view().await,
    }))
}

#[post("/sessions/{id}/reset")]
async fn reset(path: web::Path<Uuid>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.reset().await;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

#[delete("/sessions/{id}/confirmation")]
async fn dismiss_confirmation(path: web::Path<Uuid>) -> RouteResult {
    let controller = session(path.into_inner()).await?;
    controller.dismiss_confirmation().await;
    Ok(HttpResponse::Ok().json(controller.view().await))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(services)
        .service(open)
        .service(show)
        .service(edit)
        .service(select_branch)
        .service(select_date)
        .service(select_time)
        .service(submit)
        .service(reset)
        .service(dismiss_confirmation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use mockito::{Matcher, Server};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_services_lists_the_catalog() {
        let app = test::init_service(App::new().configure(init)).await;

        let req = test::TestRequest::get().uri("/services").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[3]["label"], "Suspensión");
        assert_eq!(entries[3]["problem_type"], 41);
        assert_eq!(entries[3]["problem_subtype"], 94);
    }

    #[actix_web::test]
    async fn test_unknown_session_is_not_found() {
        let app = test::init_service(App::new().configure(init)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_session_walkthrough() {
        let mut server = Server::new_async().await;
        let _branches = server
            .mock("GET", "/sucursalesClient")
            .with_status(200)
            .with_body(r#"[{"BPLId": 1, "Street": "Main"}]"#)
            .create_async()
            .await;
        let _calendar = server
            .mock("GET", "/getShiftPerMonth")
            .match_query(Matcher::UrlEncoded("BPLId".into(), "1".into()))
            .with_status(200)
            .with_body(
                r#"[{"U_Fecha": "2024-05-01", "U_HorarioRecep": [
                    {"hs": "10:00", "habilitad": "S"},
                    {"hs": "11:00", "habilitad": "N"}
                ]}]"#,
            )
            .create_async()
            .await;

        let api = ApiClient::new(server.url(), None).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(api))
                .configure(init),
        )
        .await;

        let req = test::TestRequest::post().uri("/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let opened: Value = test::read_body_json(resp).await;
        let id = opened["session_id"].as_str().unwrap().to_string();
        assert_eq!(opened["form"]["draft"]["branch_name"], "Main");
        assert_eq!(opened["form"]["times"], json!(["10:00"]));
        assert_eq!(opened["form"]["dates"][0]["label"], "miércoles, 01/05/2024");

        let req = test::TestRequest::put()
            .uri(&format!("/sessions/{id}/time"))
            .set_json(json!({ "time": "11:00" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::patch()
            .uri(&format!("/sessions/{id}/draft"))
            .set_json(json!({ "customer_name": "John123", "service": "Posventa" }))
            .to_request();
        let form: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form["draft"]["service"], "Posventa");

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{id}/submit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rejected: Value = test::read_body_json(resp).await;
        assert_eq!(rejected["fields"]["customer_name"], "El nombre solo debe contener letras");
        assert_eq!(rejected["fields"]["postal_code"], "El código postal es obligatorio");

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{id}/reset"))
            .to_request();
        let form: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form["draft"]["branch_id"], Value::Null);
        assert_eq!(form["draft"]["customer_name"], "");
    }
}
