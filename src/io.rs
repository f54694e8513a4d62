use crate::error::ParsingError;
use crate::hailstone::Hailstone;
use either::Either;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

/// Parses one `T` per non-empty line, remembering the 1-based line number of the last read.
pub struct OnePerLine<I, T> {
    input: I,
    buffer: String,
    line: usize,
    _type_of_t: std::marker::PhantomData<T>,
}

impl<I: BufRead, T: FromStr> OnePerLine<I, T> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            buffer: String::new(),
            line: 0,
            _type_of_t: Default::default(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn raw(&self) -> &str {
        self.buffer.trim()
    }
}

impl<I, T> Iterator for OnePerLine<I, T>
where
    I: BufRead,
    T: FromStr + 'static,
    T::Err: 'static,
{
    type Item = Result<T, Either<T::Err, std::io::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            self.line += 1;
            let read = self.input.read_line(&mut self.buffer);
            return match read {
                Ok(0) => None,
                Ok(_) if self.buffer.trim().is_empty() => continue,
                Ok(_) => match T::from_str(self.buffer.trim()) {
                    Ok(t) => Some(Ok(t)),
                    Err(e) => Some(Err(Either::Left(e))),
                },
                Err(e) => Some(Err(Either::Right(e))),
            };
        }
    }
}

/// Reads all hailstones in input order, failing on the first malformed line.
pub fn read_hailstones<R: BufRead>(input: R) -> Result<Vec<Hailstone>, ParsingError> {
    let mut lines = OnePerLine::<_, Hailstone>::new(input);
    let mut hailstones = Vec::new();

    while let Some(next) = lines.next() {
        match next {
            Ok(h) => hailstones.push(h),
            Err(Either::Left(source)) => {
                return Err(ParsingError::Hailstone {
                    line: lines.line(),
                    raw: lines.raw().to_owned(),
                    source,
                })
            }
            Err(Either::Right(source)) => {
                return Err(ParsingError::Io {
                    line: lines.line(),
                    source,
                })
            }
        }
    }

    tracing::debug!(count = hailstones.len(), "read hailstones");

    Ok(hailstones)
}

pub fn read_hailstones_from_path(path: &Path) -> Result<Vec<Hailstone>, ParsingError> {
    let file = std::fs::File::open(path).map_err(|source| ParsingError::Open {
        path: path.to_owned(),
        source,
    })?;

    read_hailstones(std::io::BufReader::new(file))
}
