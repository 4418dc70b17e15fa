pub mod init;
pub mod note;
pub mod project;
pub mod run;
pub mod secret;
pub mod task;
