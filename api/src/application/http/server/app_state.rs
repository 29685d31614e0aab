use std::{sync::Arc, time::Duration};

use coopdesk_core::{application::CoopdeskService, domain::common::context::RequestContext};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: CoopdeskService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CoopdeskService) -> Self {
        Self { args, service }
    }

    /// Fresh deadline for the database work of one request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(Duration::from_secs(self.args.server.request_timeout_secs))
    }
}
