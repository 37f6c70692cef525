mod html;
mod panel;
