use crate::AppState;
use crate::api::extract::ApiJson;
use crate::api::models::MessageResponse;
use crate::api::models::attendance::{AttendanceRecordResponse, AttendanceSubmission};
use crate::db::handlers::Attendance;
use crate::db::models::attendance::AttendanceUpsertDBRequest;
use crate::errors::{Error, Result};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

const LIST_ATTENDANCE_ERROR: &str = "Erro ao buscar presença";
const SAVE_ATTENDANCE_ERROR: &str = "Erro ao salvar presenças";

#[utoipa::path(
    get,
    path = "/api/presenca",
    tag = "presenca",
    summary = "List attendance records",
    responses(
        (status = 200, description = "Every stored attendance record", body = Vec<AttendanceRecordResponse>),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_attendance(State(state): State<AppState>) -> Result<Json<Vec<AttendanceRecordResponse>>> {
    info!("Buscando presença");

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(LIST_ATTENDANCE_ERROR, e))?;
    let records = Attendance::new(&mut conn)
        .list()
        .await
        .map_err(|e| Error::storage(LIST_ATTENDANCE_ERROR, e))?;

    Ok(Json(records.into_iter().map(AttendanceRecordResponse::from).collect()))
}

/// Save one day's call.
///
/// Each listed student gets the submitted status for the day, replacing any earlier status for
/// the same day. Students not listed are left as they are. The whole submission is written in one
/// transaction.
#[utoipa::path(
    post,
    path = "/api/presenca",
    tag = "presenca",
    summary = "Submit a day's call",
    request_body = AttendanceSubmission,
    responses(
        (status = 201, description = "Attendance saved", body = MessageResponse),
        (status = 200, description = "Empty call, nothing saved", body = MessageResponse),
        (status = 400, description = "Missing date or calls", body = crate::errors::ErrorBody),
        (status = 500, description = "Storage error (e.g. unknown student)", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn submit_attendance(
    State(state): State<AppState>,
    ApiJson(submission): ApiJson<AttendanceSubmission>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let (Some(data), Some(chamadas)) = (submission.data.filter(|d| !d.is_empty()), submission.chamadas) else {
        return Err(Error::bad_request(
            "Dados inválidos. É necessário fornecer a data e um array de chamadas.",
        ));
    };

    if chamadas.is_empty() {
        return Ok((StatusCode::OK, Json(MessageResponse::new("Nenhuma chamada para salvar."))));
    }

    info!("Salvando {} chamadas para o dia {}", chamadas.len(), data);

    let request = AttendanceUpsertDBRequest {
        data,
        chamadas: chamadas.into_iter().map(Into::into).collect(),
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::storage(SAVE_ATTENDANCE_ERROR, e))?;
    Attendance::new(&mut tx)
        .upsert_day(&request)
        .await
        .map_err(|e| Error::storage(SAVE_ATTENDANCE_ERROR, e))?;
    tx.commit().await.map_err(|e| Error::storage(SAVE_ATTENDANCE_ERROR, e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Presença para o dia {} salva com sucesso!", request.data))),
    ))
}
