use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::modules::curators::model::{CreateCuratorDto, Curator, UpdateCuratorDto};
use crate::modules::group_sessions::model::{
    CreateGroupSessionDto, GroupSession, UpdateGroupSessionDto,
};
use crate::modules::reports::model::CourseReportRow;
use crate::modules::reviews::model::{CreateReviewDto, Review};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, StudentResponse, UpdateStudentDto,
};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::utils::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::curators::controller::create_curator,
        crate::modules::curators::controller::get_curators,
        crate::modules::curators::controller::get_curator_by_id,
        crate::modules::curators::controller::replace_curator,
        crate::modules::curators::controller::update_curator,
        crate::modules::curators::controller::delete_curator,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::replace_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher_by_id,
        crate::modules::teachers::controller::replace_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::group_sessions::controller::create_group_session,
        crate::modules::group_sessions::controller::get_group_sessions,
        crate::modules::group_sessions::controller::get_group_session_by_id,
        crate::modules::group_sessions::controller::replace_group_session,
        crate::modules::group_sessions::controller::update_group_session,
        crate::modules::group_sessions::controller::delete_group_session,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::get_reviews,
        crate::modules::reviews::controller::get_review_by_id,
        crate::modules::reviews::controller::delete_review,
        crate::modules::reports::controller::course20_report,
        crate::modules::reports::controller::course21_report,
        crate::modules::reports::controller::course22_report,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,
            Curator,
            CreateCuratorDto,
            UpdateCuratorDto,
            StudentResponse,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            PaginationMeta,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            GroupSession,
            CreateGroupSessionDto,
            UpdateGroupSessionDto,
            Review,
            CreateReviewDto,
            CourseReportRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Staff registration and login"),
        (name = "Curators", description = "Curator management endpoints"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Teachers", description = "Teacher management endpoints"),
        (name = "Group sessions", description = "Group session management endpoints"),
        (name = "Reviews", description = "Teacher review endpoints"),
        (name = "Reports", description = "Legacy per-course student reports")
    ),
    info(
        title = "PrepDesk API",
        version = "0.1.0",
        description = "A REST API for running an IELTS preparation school: curators, students, teachers, group sessions and reviews.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
