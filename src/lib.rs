//! Bitlings: small creatures that sense a shared world, decide with a tiny
//! learned network and act over several ticks, watched live over a websocket.

pub mod app;
pub mod model;
