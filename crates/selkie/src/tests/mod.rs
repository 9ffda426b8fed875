mod detect;
mod direct;
