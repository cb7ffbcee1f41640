use crate::AppState;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::models::MessageResponse;
use crate::api::models::enrollments::{EnrollmentCreate, EnrollmentCreated, EnrollmentResponse, EnrollmentUpdate};
use crate::db::errors::DbError;
use crate::db::handlers::Enrollments;
use crate::db::models::enrollments::EnrollmentCreateDBRequest;
use crate::errors::{Error, Result};
use crate::types::{EnrollmentId, StudentId};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

const LIST_ENROLLMENTS_ERROR: &str = "Erro ao buscar as matrículas do aluno";
const CREATE_ENROLLMENT_ERROR: &str = "Erro ao criar matrícula";
const UPDATE_ENROLLMENT_ERROR: &str = "Erro ao atualizar matrícula";
const DELETE_ENROLLMENT_ERROR: &str = "Erro ao inativar matrícula";

const ENROLLMENT_NOT_FOUND: &str = "Matrícula não encontrada.";

#[utoipa::path(
    get,
    path = "/api/matriculas/aluno/{idaluno}",
    tag = "matriculas",
    summary = "List a student's enrollments",
    params(
        ("idaluno" = i64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "The student's enrollments (possibly empty)", body = Vec<EnrollmentResponse>),
        (status = 400, description = "Non-numeric student ID", body = crate::errors::ErrorBody),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_student_enrollments(
    State(state): State<AppState>,
    ApiPath(idaluno): ApiPath<StudentId>,
) -> Result<Json<Vec<EnrollmentResponse>>> {
    info!("Buscando matrículas do aluno {}", idaluno);

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(LIST_ENROLLMENTS_ERROR, e))?;
    let enrollments = Enrollments::new(&mut conn)
        .list_for_student(idaluno)
        .await
        .map_err(|e| Error::storage(LIST_ENROLLMENTS_ERROR, e))?;

    Ok(Json(enrollments.into_iter().map(EnrollmentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/matriculas",
    tag = "matriculas",
    summary = "Enroll a student",
    request_body = EnrollmentCreate,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentCreated),
        (status = 400, description = "A required field is missing", body = crate::errors::ErrorBody),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<EnrollmentCreate>,
) -> Result<(StatusCode, Json<EnrollmentCreated>)> {
    let request = match create {
        EnrollmentCreate {
            idaluno: Some(idaluno),
            idatividades: Some(idatividades),
            turno: Some(turno),
            horario: Some(horario),
            dia_semana: Some(dia_semana),
        } if idaluno != 0 && idatividades != 0 && !turno.is_empty() && !horario.is_empty() && !dia_semana.is_empty() => {
            EnrollmentCreateDBRequest {
                idaluno,
                idatividades,
                turno,
                horario,
                dia_semana,
            }
        }
        _ => {
            return Err(Error::bad_request(
                "Todos os campos são obrigatórios: idaluno, idatividades, turno, horario, dia_semana.",
            ));
        }
    };

    info!("Matriculando aluno {} na atividade {}", request.idaluno, request.idatividades);

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(CREATE_ENROLLMENT_ERROR, e))?;
    let enrollment = Enrollments::new(&mut conn)
        .create(&request)
        .await
        .map_err(|e| Error::storage(CREATE_ENROLLMENT_ERROR, e))?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentCreated {
            idmatricula: enrollment.idmatricula,
            message: "Aluno matriculado com sucesso!".to_string(),
        }),
    ))
}

/// Update the provided fields of an enrollment.
///
/// Empty strings and `0` count as not provided and never overwrite a stored value.
#[utoipa::path(
    put,
    path = "/api/matriculas/{id}",
    tag = "matriculas",
    summary = "Update an enrollment",
    request_body = EnrollmentUpdate,
    params(
        ("id" = i64, Path, description = "Enrollment ID"),
    ),
    responses(
        (status = 200, description = "Enrollment updated", body = MessageResponse),
        (status = 400, description = "No field to update", body = crate::errors::ErrorBody),
        (status = 404, description = "Enrollment not found", body = crate::errors::ErrorBody),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EnrollmentId>,
    ApiJson(update): ApiJson<EnrollmentUpdate>,
) -> Result<Json<MessageResponse>> {
    if !update.has_changes() {
        return Err(Error::bad_request("Pelo menos um campo deve ser fornecido para atualização."));
    }

    info!("Atualizando matrícula {}", id);

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(UPDATE_ENROLLMENT_ERROR, e))?;
    match Enrollments::new(&mut conn).update(id, &update.into()).await {
        Ok(_) => Ok(Json(MessageResponse::new("Matrícula atualizada com sucesso!"))),
        Err(DbError::NotFound) => Err(Error::not_found(ENROLLMENT_NOT_FOUND)),
        Err(e) => Err(Error::storage(UPDATE_ENROLLMENT_ERROR, e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/matriculas/{id}",
    tag = "matriculas",
    summary = "Delete an enrollment",
    params(
        ("id" = i64, Path, description = "Enrollment ID"),
    ),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = crate::errors::ErrorBody),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_enrollment(State(state): State<AppState>, ApiPath(id): ApiPath<EnrollmentId>) -> Result<Json<MessageResponse>> {
    info!("Apagando matrícula {}", id);

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(DELETE_ENROLLMENT_ERROR, e))?;
    let deleted = Enrollments::new(&mut conn)
        .delete(id)
        .await
        .map_err(|e| Error::storage(DELETE_ENROLLMENT_ERROR, e))?;

    if !deleted {
        return Err(Error::not_found(ENROLLMENT_NOT_FOUND));
    }

    Ok(Json(MessageResponse::new("Matrícula apagada com sucesso!")))
}
