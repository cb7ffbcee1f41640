//! OpenAPI documentation for the `/api` surface.

use crate::api::handlers::{attendance, enrollments, schedule, students};
use crate::api::models::{
    MessageResponse,
    attendance::{AttendanceRecordResponse, AttendanceSubmission, CallEntry},
    enrollments::{EnrollmentCreate, EnrollmentCreated, EnrollmentResponse, EnrollmentUpdate},
    schedule::ScheduleEntryResponse,
    students::StudentResponse,
};
use crate::errors::ErrorBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chamada API",
        description = "Student roster, daily attendance (chamada) and class enrollment records."
    ),
    paths(
        students::list_students,
        attendance::list_attendance,
        attendance::submit_attendance,
        schedule::get_schedule,
        enrollments::list_student_enrollments,
        enrollments::create_enrollment,
        enrollments::update_enrollment,
        enrollments::delete_enrollment,
    ),
    components(schemas(
        StudentResponse,
        AttendanceSubmission,
        CallEntry,
        AttendanceRecordResponse,
        ScheduleEntryResponse,
        EnrollmentCreate,
        EnrollmentUpdate,
        EnrollmentResponse,
        EnrollmentCreated,
        MessageResponse,
        ErrorBody,
    )),
    tags(
        (name = "alunos", description = "Student roster"),
        (name = "presenca", description = "Daily attendance"),
        (name = "grade", description = "Schedule view"),
        (name = "matriculas", description = "Enrollment management"),
    )
)]
pub struct ApiDoc;
