use std::io::Read;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use console::{style, Color};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use ricochet_solver::{solve, Colour, Game, Move, Shape, Token, MIN_ROBOTS};

const USAGE: &str = "Usage: ricochet-solver <MAP|-> [all | <shape>:<colour>...]";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().context(USAGE)?;
    let map_data = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read the map from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&path).context("Failed to read the map")?
    };
    let game = map_data
        .parse::<Game>()
        .context("Failed to parse the map")?;
    ensure!(
        game.is_valid(),
        "Invalid board: every token needs a sink and at least {MIN_ROBOTS} robots are required"
    );

    let tokens = parse_tokens(args)?;

    let multi = MultiProgress::new();
    let bar_style =
        ProgressStyle::with_template("{spinner} {prefix}: {msg} ({pos} states, {elapsed})")?;
    let results = tokens
        .par_iter()
        .map(|&token| {
            let bar = multi.add(
                ProgressBar::new_spinner()
                    .with_style(bar_style.clone())
                    .with_prefix(token.to_string()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));

            let mut cur_depth = None;
            let moves = solve::bfs(&game.state(), token, |depth| {
                bar.inc(1);
                if cur_depth != Some(depth) {
                    cur_depth = Some(depth);
                    bar.set_message(format!("depth {depth}"));
                }
            });

            bar.finish_and_clear();
            (token, moves)
        })
        .collect::<Vec<_>>();

    for (token, moves) in results {
        match moves {
            None => println!("{token}: no solution"),
            Some(moves) => {
                let plural = if moves.len() == 1 { "" } else { "s" };
                println!("{token}: {} move{plural}", moves.len());
                for (mv, i) in moves.iter().zip(1..) {
                    println!("{i:4}. {}", paint(mv));
                }
            }
        }
    }

    Ok(())
}

fn parse_tokens(args: impl Iterator<Item = String>) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for arg in args {
        if arg == "all" {
            tokens.extend(Token::all());
        } else {
            tokens.push(arg.parse::<Token>()?);
        }
    }
    if tokens.is_empty() {
        tokens.push(Token {
            shape: Shape::Circle,
            colour: Colour::Blue,
        });
    }
    Ok(tokens)
}

fn paint(mv: &Move) -> String {
    let color = match mv.robot.0 {
        Colour::Blue => Color::Blue,
        Colour::Yellow => Color::Yellow,
        Colour::Green => Color::Green,
        Colour::Red => Color::Red,
        Colour::Silver => Color::White,
    };
    format!("{} {} {}", style(mv.robot).fg(color).bold(), mv.dir, mv.to)
}
