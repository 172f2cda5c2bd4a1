//! Small number-stream exercises that ship alongside the maze game.

use log::warn;
use std::io::{self, BufRead, Write};

use crate::config::Exercise;

const RUN_SENTINEL: i64 = -1;
const STATS_SENTINEL: i64 = 0;

/// Length of the longest strictly increasing run of consecutive numbers.
pub fn longest_increasing_run(numbers: &[i64]) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut prev: Option<i64> = None;
    for &n in numbers {
        current = match prev {
            Some(p) if n > p => current + 1,
            _ => 1,
        };
        best = best.max(current);
        prev = Some(n);
    }
    best
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub average: Option<f64>,
    pub second_largest: Option<i64>,
}

/// Average of the numbers and the largest value strictly below the maximum.
pub fn stats(numbers: &[i64]) -> Stats {
    let mut largest: Option<i64> = None;
    let mut second: Option<i64> = None;
    let mut sum = 0i128;
    for &n in numbers {
        sum += i128::from(n);
        match largest {
            Some(l) if n > l => {
                second = Some(l);
                largest = Some(n);
            }
            Some(l) if n < l && second.map_or(true, |s| n > s) => second = Some(n),
            None => largest = Some(n),
            _ => {}
        }
    }
    let count = numbers.len();
    Stats {
        count,
        average: (count > 0).then(|| sum as f64 / count as f64),
        second_largest: second,
    }
}

/// Whitespace-separated integers up to `sentinel` or end of input.
pub fn read_until(reader: impl BufRead, sentinel: i64) -> io::Result<Vec<i64>> {
    let mut numbers = Vec::new();
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            match token.parse::<i64>() {
                Ok(n) if n == sentinel => return Ok(numbers),
                Ok(n) => numbers.push(n),
                Err(_) => warn!("Ignoring invalid number {token:?}"),
            }
        }
    }
    Ok(numbers)
}

pub fn run(exercise: Exercise, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    match exercise {
        Exercise::IncreasingRun => {
            let numbers = read_until(input, RUN_SENTINEL)?;
            writeln!(
                out,
                "The length of the longest strictly increasing run is: {}",
                longest_increasing_run(&numbers)
            )
        }
        Exercise::Stats => {
            let numbers = read_until(input, STATS_SENTINEL)?;
            let s = stats(&numbers);
            match s.average {
                Some(avg) => writeln!(out, "Average of numbers is: {avg:.2}")?,
                None => writeln!(out, "No numbers entered.")?,
            }
            match s.second_largest {
                Some(n) if s.count >= 2 => writeln!(out, "Second largest number is: {n}"),
                _ => writeln!(
                    out,
                    "Fewer than two valid numbers entered or second largest does not exist."
                ),
            }
        }
    }
}
