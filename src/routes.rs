use crate::error::{ServiceError, ValidationError};
use crate::handler::StudentService;
use crate::record::{MarksInput, StudentInput, StudentRecord};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

pub fn routes(
    service: Arc<StudentService>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let students = warp::path("api").and(warp::path("students"));

    let create = students
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(create_student);

    let update = students
        .clone()
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(update_marks);

    let fetch = students
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service))
        .and_then(find_student);

    create
        .or(update)
        .or(fetch)
        .with(warp::trace::request())
        .recover(handle_rejection)
}

fn with_service(
    service: Arc<StudentService>,
) -> impl Filter<Extract = (Arc<StudentService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

async fn create_student(
    input: StudentInput,
    service: Arc<StudentService>,
) -> Result<Response, Infallible> {
    Ok(run_blocking(move || service.create_student(input)).await)
}

async fn update_marks(
    id: i64,
    marks: MarksInput,
    service: Arc<StudentService>,
) -> Result<Response, Infallible> {
    Ok(run_blocking(move || service.update_marks(id, marks)).await)
}

async fn find_student(id: i64, service: Arc<StudentService>) -> Result<Response, Infallible> {
    Ok(run_blocking(move || service.find_student(id)).await)
}

/// Store calls are synchronous, so they run on the blocking pool.
async fn run_blocking<F>(call: F) -> Response
where
    F: FnOnce() -> Result<StudentRecord, ServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => into_response(result),
        Err(err) => {
            tracing::error!(error = %err, "request task failed");
            internal_error()
        }
    }
}

fn into_response(result: Result<StudentRecord, ServiceError>) -> Response {
    match result {
        Ok(record) => warp::reply::json(&record).into_response(),
        Err(ServiceError::Validation(ValidationError::InvalidMarks)) => {
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(ServiceError::Validation(reason)) => {
            warp::reply::with_status(reason.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
        Err(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(ServiceError::Store(_)) => internal_error(),
    }
}

fn internal_error() -> Response {
    warp::reply::with_status(
        "Internal server error".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        let reply = warp::reply::with_status(body_err.to_string(), StatusCode::BAD_REQUEST);
        return Ok(reply.into_response());
    }

    let status = if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        StatusCode::METHOD_NOT_ALLOWED
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::warn!(rejection = ?err, "unhandled rejection");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok(status.into_response())
}
