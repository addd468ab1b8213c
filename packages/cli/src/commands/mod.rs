pub mod edit;
pub mod import;
pub mod init;
pub mod new;
pub mod show;

pub use edit::{edit, EditArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use show::{show, ShowArgs};
