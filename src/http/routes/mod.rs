pub mod categories;
pub mod tasks;

use crate::application::board_service::BoardService;

#[derive(Clone)]
pub struct AppState<S: BoardService> {
    pub service: S,
}
