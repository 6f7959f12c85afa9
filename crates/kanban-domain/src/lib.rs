pub mod board;
pub mod column;
pub mod command;
pub mod gesture;
pub mod search;
pub mod task;

pub use board::{move_item, BoardState, ColumnView};
pub use column::{Column, ColumnId};
pub use command::SyncCommand;
pub use gesture::{
    DragSubject, DropTarget, GestureEnd, GestureEvent, GestureInterpreter, GestureOver, Point,
    PointerEvent, DEFAULT_ACTIVATION_DISTANCE,
};
pub use search::TitleSearcher;
pub use task::{NewTask, Task, TaskId, TaskPriority};
