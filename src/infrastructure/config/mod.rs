//! Config file infrastructure

mod xdg;

pub use xdg::XdgConfigStore;
