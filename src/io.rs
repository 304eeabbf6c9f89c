//! Whitespace-delimited token input shared by vector and matrix readers.
//!
//! `TokenReader` pulls one line at a time from any `BufRead` and hands out
//! tokens in order, so consecutive `read_from` calls on several containers
//! continue exactly where the previous one stopped.
use std::collections::VecDeque;
use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{LinalgError, Result};

pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
    consumed: usize,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            consumed: 0,
        }
    }

    /// Number of tokens handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Next raw token, or `None` once the underlying reader is exhausted.
    pub fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        self.consumed += 1;
        Ok(self.pending.pop_front())
    }

    /// Read exactly `count` tokens and parse each as `T`.
    ///
    /// Values are collected before being returned, so a short or malformed
    /// input never reaches the caller's container.
    pub fn parse_n<T>(&mut self, count: usize) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let mut values = Vec::with_capacity(count);
        for found in 0..count {
            let position = self.consumed;
            let token = match self.next_token()? {
                Some(token) => token,
                None => {
                    return Err(LinalgError::UnexpectedEof {
                        expected: count,
                        found,
                    })
                }
            };
            let value = token.parse::<T>().map_err(|e| LinalgError::Parse {
                position,
                message: e.to_string(),
                token,
            })?;
            values.push(value);
        }
        Ok(values)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<'a> TokenReader<&'a [u8]> {
    pub fn from_text(input: &'a str) -> Self {
        TokenReader::new(input.as_bytes())
    }
}
