mod details;
mod fps;
mod panels;
mod ranking;
