pub mod approve;
pub mod list;
pub mod run;
