mod panel;
mod redirect;
