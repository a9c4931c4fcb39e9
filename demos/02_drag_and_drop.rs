//! Demo 02: Drag and Drop
//!
//! This demo drives task moves through the drag coordinator, including a
//! drop back onto the origin column and a cancelled drag.
//!
//! Run with: cargo run --example 02_drag_and_drop

use eyre::{Result, eyre};
use kanban::{BoardController, ColumnId, DragCoordinator, render, suggestions};

fn main() -> Result<()> {
    let mut board = BoardController::default();
    let mut dnd = DragCoordinator::new();
    let todo = ColumnId::from(suggestions::DEFAULT_COLUMN_ID);
    let done = ColumnId::from("3");

    println!("Kanban Drag and Drop");
    println!("====================\n");

    // Seed the default column from the presets
    let presets = board.suggestions().to_vec();
    let first = board.add_suggested_task(&presets[0])?;
    let second = board.add_suggested_task(&presets[1])?;
    print!("{}", render::board_text(board.board()));
    println!();

    // Drop onto the origin column: the card goes to the end, once
    println!("1. Dragging '{}' and dropping it back on To Do...", presets[0].title);
    dnd.begin_drag(first, todo.clone());
    let event = dnd.drop_on(todo.clone()).ok_or_else(|| eyre!("drop produced no event"))?;
    board.handle_drop(&event)?;
    let order: Vec<String> = board
        .board()
        .column(&todo)
        .map(|c| c.tasks().iter().map(|t| t.title().to_string()).collect())
        .unwrap_or_default();
    println!("   To Do order: {:?}\n", order);

    // Cancelled drag produces nothing
    println!("2. Starting a drag and cancelling it...");
    dnd.begin_drag(second, todo.clone());
    dnd.cancel();
    println!("   Drop after cancel yields an event: {}\n", dnd.drop_on(done.clone()).is_some());

    // Regular move across columns
    println!("3. Dragging '{}' to Done...", presets[1].title);
    dnd.begin_drag(second, todo);
    let event = dnd.drop_on(done).ok_or_else(|| eyre!("drop produced no event"))?;
    board.handle_drop(&event)?;
    print!("{}", render::board_text(board.board()));

    println!("\nDemo complete!");
    Ok(())
}
