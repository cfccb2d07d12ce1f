pub mod dialog;
pub mod file_list;
pub mod path_bar;
pub mod status_bar;
