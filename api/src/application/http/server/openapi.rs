use crate::application::http::{
    branch::router::BranchApiDoc, footstep::router::FootstepApiDoc, health::HealthApiDoc,
    media::router::MediaApiDoc, member::router::MemberApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coopdesk API"
    ),
    nest(
        (path = "/branches", api = BranchApiDoc),
        (path = "/members", api = MemberApiDoc),
        (path = "/media", api = MediaApiDoc),
        (path = "/footsteps", api = FootstepApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
