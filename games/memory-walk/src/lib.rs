use wasm_bindgen::prelude::*;

mod content;
mod game;

use game::MemoryWalk;

stroll_web::export_game!(MemoryWalk, "memory-walk");
