//! Demo 01: Board Walkthrough
//!
//! This demo adds, edits, moves and deletes tasks through the controller,
//! and shows that earlier snapshots are unaffected by later changes.
//!
//! Run with: cargo run --example 01_board_walkthrough

use eyre::{Result, eyre};
use kanban::{BoardController, ColumnId, render};

fn main() -> Result<()> {
    let mut board = BoardController::default();
    let todo = ColumnId::from("1");
    let doing = ColumnId::from("2");

    println!("Kanban Board Walkthrough");
    println!("========================\n");

    // ADD: a task in To Do
    println!("1. ADD - Creating a task in To Do...");
    let id = board.add_task(&todo, "Write spec", "Draft section 1")?;
    println!("   Created task {}\n", id.short());

    let before_move = board.snapshot();

    // EDIT: request, then commit new text
    println!("2. EDIT - Rewording the task...");
    let request = board.request_edit(&todo, id)?;
    println!("   Current title: {}", request.title);
    board.commit_edit(&request, "Write full spec", "Draft sections 1 and 2")?;
    println!("   Edited.\n");

    // MOVE: To Do -> Doing
    println!("3. MOVE - Moving the task to Doing...");
    board.move_task(id, &todo, &doing)?;
    print!("{}", render::board_text(board.board()));
    println!();

    // REJECTED: empty fields leave the board as it was
    println!("4. VALIDATION - Adding a task without a description...");
    match board.add_task(&todo, "Orphan", "") {
        Ok(_) => return Err(eyre!("empty description was accepted")),
        Err(e) => println!("   Rejected: {}\n", e),
    }

    // DELETE
    println!("5. DELETE - Removing the task...");
    board.delete_task(&doing, id)?;
    println!("   Tasks on board: {}\n", board.board().task_count());

    let kept = before_move.column(&todo).map(|c| c.len()).unwrap_or(0);
    println!("Snapshot taken before the move still has {} task(s) in To Do", kept);

    println!("\nDemo complete!");
    Ok(())
}
