use std::sync::Arc;

use menujudge_core::application::MenuJudgeService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MenuJudgeService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MenuJudgeService) -> Self {
        Self { args, service }
    }
}
