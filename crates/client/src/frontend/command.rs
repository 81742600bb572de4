//! Parsing of typed terminal commands.
use std::str::FromStr;

use drill_core::{Difficulty, RoundFilter};

/// One line of learner input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Combine picker entries, zero-based.
    Combine { left: usize, right: usize },
    Skip,
    NewRound,
    /// Start a round with a filter; `None` is mixed mode.
    Filter(Option<RoundFilter>),
    Difficulty(Difficulty),
    /// Toggle on a finished word, zero-based; `None` is the last one.
    ToggleFavorite(Option<usize>),
    ToggleLearned(Option<usize>),
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
  <l> <r>          combine prefix <l> with root <r>
  s                skip the current word
  n                new round
  f prefix <v>     practice one prefix
  f root <v>       practice one root
  f fav            practice favorites
  f mixed          practice everything not learned
  d easy|medium|hard
  fav [n]          toggle favorite on finished word <n> (default: last)
  learned [n]      toggle learned on finished word <n> (default: last)
  stats            show statistics
  q                quit";

impl FromStr for Input {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts.next().ok_or_else(|| "empty input".to_string())?;
        let rest: Vec<&str> = parts.collect();

        if let Ok(left) = head.parse::<usize>() {
            let [right] = rest.as_slice() else {
                return Err("usage: <l> <r>".into());
            };
            let right = right
                .parse::<usize>()
                .map_err(|_| format!("'{right}' is not a number"))?;
            return match (left.checked_sub(1), right.checked_sub(1)) {
                (Some(left), Some(right)) => Ok(Self::Combine { left, right }),
                _ => Err("entries are numbered from 1".into()),
            };
        }

        let input = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("s" | "skip", []) => Self::Skip,
            ("n" | "new", []) => Self::NewRound,
            ("f" | "filter", args) => Self::Filter(parse_filter(args)?),
            ("d" | "difficulty", [level]) => Self::Difficulty(
                level
                    .parse()
                    .map_err(|_| format!("unknown difficulty '{level}'"))?,
            ),
            ("fav", args) => Self::ToggleFavorite(parse_position(args)?),
            ("learned", args) => Self::ToggleLearned(parse_position(args)?),
            ("stats", []) => Self::Stats,
            ("h" | "help" | "?", []) => Self::Help,
            ("q" | "quit", []) => Self::Quit,
            _ => return Err(format!("unknown command '{}'", line.trim())),
        };
        Ok(input)
    }
}

fn parse_position(args: &[&str]) -> Result<Option<usize>, String> {
    match args {
        [] => Ok(None),
        [n] => match n.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n - 1)),
            _ => Err(format!("'{n}' is not a word number")),
        },
        _ => Err("usage: fav [n] | learned [n]".into()),
    }
}

fn parse_filter(args: &[&str]) -> Result<Option<RoundFilter>, String> {
    match args {
        ["fav" | "favorites"] => Ok(Some(RoundFilter::favorites())),
        ["mixed"] => Ok(None),
        ["prefix", value @ ..] => Ok(Some(RoundFilter::prefix(value.join(" ")))),
        ["root", value @ ..] if !value.is_empty() => Ok(Some(RoundFilter::root(value.join(" ")))),
        _ => Err("usage: f prefix <v> | f root <v> | f fav | f mixed".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Input, String> {
        line.parse()
    }

    #[test]
    fn combine_indices_are_one_based() {
        assert_eq!(parse("2 3"), Ok(Input::Combine { left: 1, right: 2 }));
        assert!(parse("0 1").is_err());
        assert!(parse("1").is_err());
        assert!(parse("1 x").is_err());
    }

    #[test]
    fn filters() {
        assert_eq!(
            parse("f prefix ver"),
            Ok(Input::Filter(Some(RoundFilter::prefix("ver"))))
        );
        assert_eq!(
            parse("f root stehen"),
            Ok(Input::Filter(Some(RoundFilter::root("stehen"))))
        );
        assert_eq!(parse("f fav"), Ok(Input::Filter(Some(RoundFilter::favorites()))));
        assert_eq!(parse("f mixed"), Ok(Input::Filter(None)));
        assert!(parse("f root").is_err());
    }

    #[test]
    fn blank_prefix_filter_selects_prefixless_words() {
        assert_eq!(parse("f prefix"), Ok(Input::Filter(Some(RoundFilter::prefix("")))));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("s"), Ok(Input::Skip));
        assert_eq!(parse(" N "), Ok(Input::NewRound));
        assert_eq!(parse("d hard"), Ok(Input::Difficulty(Difficulty::Hard)));
        assert_eq!(parse("fav"), Ok(Input::ToggleFavorite(None)));
        assert_eq!(parse("fav 2"), Ok(Input::ToggleFavorite(Some(1))));
        assert_eq!(parse("learned"), Ok(Input::ToggleLearned(None)));
        assert_eq!(parse("learned 1"), Ok(Input::ToggleLearned(Some(0))));
        assert!(parse("fav 0").is_err());
        assert!(parse("learned 1 2").is_err());
        assert_eq!(parse("stats"), Ok(Input::Stats));
        assert_eq!(parse("q"), Ok(Input::Quit));
        assert!(parse("d brutal").is_err());
        assert!(parse("jump").is_err());
        assert!(parse("").is_err());
    }
}
