use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Board, Colour, Direction, Game, Robot, Shape, State, Token, Vec2};

/// Reads a board description, one command per line:
///
/// - `BOARD <size>`, exactly once and before anything else.
/// - `OOB <x,y>`
/// - `WALL <x,y> <direction>`, direction `0..=3` from north clockwise.
/// - `SINK <x,y> <colour> <shape>`, colour and shape `0..=3`.
/// - `ROBOT <x,y> <colour>`, colour `0..=3` or `10` for silver.
///
/// Reading stops at the first blank line.
impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = None;
        let mut robots = Vec::new();

        for (line, lineno) in s.lines().map(|line| line.trim()).zip(1..) {
            if line.is_empty() {
                break;
            }
            parse_command(line, lineno, &mut board, &mut robots)
                .with_context(|| format!("Error on line {lineno}"))?;
        }

        let board = board.context("Missing board")?;

        // Robots are placed once the geometry is final.
        let mut state = State::new(&board);
        for (lineno, pos, robot) in robots {
            state.add_robot(pos, robot).with_context(|| {
                format!("Error on line {lineno}: cannot place {robot} robot at {pos}")
            })?;
        }
        let robots = state.robots;

        Ok(Game { board, robots })
    }
}

fn parse_command(
    line: &str,
    lineno: usize,
    board: &mut Option<Board>,
    robots: &mut Vec<(usize, Vec2, Robot)>,
) -> Result<()> {
    let mut words = line.split_whitespace();
    let cmd = words.next().context("Missing command")?;
    let args = words.collect::<Vec<_>>();

    if cmd == "BOARD" {
        ensure!(board.is_none(), "Board already declared");
        let [size] = &args[..] else {
            bail!("Bad syntax, expecting `BOARD <size>`");
        };
        let size = size.parse::<i32>().context("Bad board size")?;
        *board = Some(Board::new(size)?);
        return Ok(());
    }

    let board = board.as_mut().context("No board declared yet")?;
    match (cmd, &args[..]) {
        ("OOB", [pos]) => board.mark_out_of_bounds(parse_pos(pos)?)?,
        ("WALL", [pos, dir]) => {
            let pos = parse_pos(pos)?;
            let dir = parse_code(dir, Direction::from_code).context("Bad direction")?;
            board.add_wall(pos, dir)?;
        }
        ("SINK", [pos, colour, shape]) => {
            let pos = parse_pos(pos)?;
            let colour = parse_code(colour, Colour::from_code)
                .filter(|colour| colour.is_token_colour())
                .context("Bad colour")?;
            let shape = parse_code(shape, Shape::from_code).context("Bad shape")?;
            board.add_sink(Token { shape, colour }, pos)?;
        }
        ("ROBOT", [pos, colour]) => {
            let pos = parse_pos(pos)?;
            let colour = parse_code(colour, Colour::from_code).context("Bad colour")?;
            robots.push((lineno, pos, Robot(colour)));
        }
        ("OOB" | "WALL" | "SINK" | "ROBOT", _) => bail!("Bad syntax for `{cmd}`"),
        _ => bail!("Unknown command {cmd:?}"),
    }
    Ok(())
}

fn parse_pos(s: &str) -> Result<Vec2> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("Bad position {s:?}"))?;
    let x = x.parse().with_context(|| format!("Bad position {s:?}"))?;
    let y = y.parse().with_context(|| format!("Bad position {s:?}"))?;
    Ok(Vec2(x, y))
}

fn parse_code<T>(s: &str, from_code: impl FnOnce(u8) -> Option<T>) -> Option<T> {
    s.parse::<u8>().ok().and_then(from_code)
}

impl FromStr for Shape {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .with_context(|| format!("Invalid shape: {s:?}"))
    }
}

impl FromStr for Colour {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::TOKEN
            .into_iter()
            .chain([Colour::Silver])
            .find(|colour| colour.name() == s)
            .with_context(|| format!("Invalid colour: {s:?}"))
    }
}

/// `<shape>:<colour>`, e.g. `circle:blue`.
impl FromStr for Token {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (shape, colour) = s
            .split_once(':')
            .with_context(|| format!("Invalid token {s:?}, expecting `<shape>:<colour>`"))?;
        let shape = shape.parse()?;
        let colour = colour.parse::<Colour>()?;
        ensure!(colour.is_token_colour(), "Tokens cannot be {colour}");
        Ok(Token { shape, colour })
    }
}
