mod batch;
mod common;
mod intake;
mod routing;
