use anyhow::Result;
use clap::Parser;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connectn_game::board::{Board, Cell};
use connectn_game::session::{GameSession, GameState};
use connectn_game::strategy::{Difficulty, Strategy};

/// An interactive connect-N game against a computer opponent
#[derive(Parser)]
#[command(name = "connectn", version, about)]
struct Args {
    /// Board rows (3-30)
    #[arg(long, default_value_t = 3)]
    rows: usize,

    /// Board columns (3-30)
    #[arg(long, default_value_t = 3)]
    columns: usize,

    /// Marks in a row needed to win, up to the shorter board dimension
    #[arg(long, default_value_t = 3)]
    win_length: usize,

    /// Computer strength: random, heuristic or minimax
    #[arg(long, default_value = "minimax")]
    difficulty: String,

    /// Wall-clock budget for a minimax move, in milliseconds
    #[arg(long, default_value_t = 1500)]
    search_ms: u64,

    /// RNG seed, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let difficulty: Difficulty = args.difficulty.parse()?;

    let strategy = match args.seed {
        Some(seed) => Strategy::from_seed(difficulty, seed),
        None => Strategy::new(difficulty),
    }
    .with_search_budget(Duration::from_millis(args.search_ms));

    let mut session =
        GameSession::new(args.rows, args.columns, args.win_length)?.with_strategy(strategy);

    let stdin = stdin();

    println!("Welcome to Connect-{}\n", session.win_length());
    println!(
        "Enter moves as 'row column', both starting at 1. The computer ({}) answers.",
        difficulty.name()
    );

    // session loop, one round per iteration
    loop {
        // round loop
        loop {
            display(session.board())?;

            match session.state() {
                GameState::Playing => {
                    print!(
                        "Player {} move (row column) > ",
                        session.current_player().symbol()
                    );
                    stdout().flush().expect("failed to flush to stdout!");
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    let mut numbers = input_str
                        .trim()
                        .split_whitespace()
                        .map(|token| token.parse::<usize>());
                    let (row, column) = match (numbers.next(), numbers.next()) {
                        (Some(Ok(row)), Some(Ok(column))) if row >= 1 && column >= 1 => {
                            (row - 1, column - 1)
                        }
                        _ => {
                            println!("Invalid input: {}", input_str.trim());
                            // ask for the move again
                            continue;
                        }
                    };

                    if row >= session.board().rows() || column >= session.board().columns() {
                        println!(
                            "Invalid move, ({}, {}) out of range. This board has {} rows and {} columns",
                            row + 1,
                            column + 1,
                            session.board().rows(),
                            session.board().columns()
                        );
                        continue;
                    }
                    if !session.board().get(row, column).is_empty() {
                        println!(
                            "Invalid move, cell ({}, {}) already taken",
                            row + 1,
                            column + 1
                        );
                        continue;
                    }

                    session.apply_move(row, column);
                }

                // end states
                GameState::PlayerOneWin => {
                    println!("Player X wins!");
                    break;
                }
                GameState::PlayerTwoWin => {
                    println!("Player O wins!");
                    break;
                }
                GameState::Draw => {
                    println!("Draw!");
                    break;
                }
            }
        }

        // offer a rematch with the same settings; which mark the computer
        // plays rotates between rounds
        let mut rematch = false;
        loop {
            print!("Play again? y/n: ");
            stdout().flush().expect("failed to flush to stdout!");

            let mut buffer = String::new();
            stdin.read_line(&mut buffer)?;

            match buffer.to_lowercase().chars().next() {
                Some(_letter @ 'y') => {
                    rematch = true;
                    break;
                }
                Some(_letter @ 'n') => break,
                _ => println!("Unknown answer given"),
            }
        }
        if !rematch {
            break;
        }

        session.configure(args.rows, args.columns, args.win_length)?;
        println!(
            "\nNew round: you play {}.",
            session.current_player().symbol()
        );
    }
    Ok(())
}

/// Draws the board as a grid with 1-indexed row and column headers
fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (1..=board.columns()).map(|c| format!("{:>3}", c)).collect();
    stdout.queue(PrintStyledContent(style(format!("\n   {}\n", header))))?;

    for row in 0..board.rows() {
        stdout.queue(PrintStyledContent(style(format!("{:>3}", row + 1))))?;
        for column in 0..board.columns() {
            let cell = board.get(row, column);
            stdout.queue(PrintStyledContent(
                style(format!("{:>3}", cell.symbol()))
                    .attribute(Attribute::Bold)
                    .with(match cell {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkGrey,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
