pub mod flybg;
