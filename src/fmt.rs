use std::fmt::{self, Debug, Display, Formatter};

use crate::execution::*;

impl<T: Debug> Display for Execution<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "INIT PART:")?;
        write!(f, "{}", self.init_part)?;

        writeln!(f, "PARALLEL PART:")?;
        write!(f, "{}", self.parallel_part)?;

        writeln!(f, "POST PART:")?;
        write!(f, "{}", self.post_part)
    }
}

impl<T: Debug> Display for Invocation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?} : {:?}", self.op, self.ret))
    }
}

impl<T: Debug> Display for ParallelInvocation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?} : {:?}", self.op, self.ret))
    }
}

impl<T: Debug> Display for History<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for inv in self.iter() {
            writeln!(f, "    {}", inv)?;
        }
        Ok(())
    }
}

/// Renders the concurrent part as a timeline: one column per thread, one row per tick of the
/// logical clock. An invocation is printed on its call tick and continued with `|` until
/// its return tick.
impl<T: Debug> Display for ParallelHistory<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let thread_parts = self.thread_parts();
        let Some(last_tick) = self.iter().map(|inv| inv.return_timestamp).max() else {
            return Ok(());
        };

        let headers: Vec<_> = (0..thread_parts.len())
            .map(|thread_id| format!("THREAD {}", thread_id))
            .collect();
        let cells: Vec<Vec<_>> = thread_parts
            .iter()
            .map(|part| part.iter().map(|inv| inv.to_string()).collect())
            .collect();
        let widths: Vec<_> = headers
            .iter()
            .zip(&cells)
            .map(|(header, cells)| {
                cells
                    .iter()
                    .map(String::len)
                    .chain([header.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let tick_width = last_tick.to_string().len().max(4);

        write!(f, "{:>tick_width$} ", "TICK")?;
        for (header, &width) in headers.iter().zip(&widths) {
            write!(f, "| {:<width$} ", header)?;
        }
        writeln!(f)?;

        for tick in 0..=last_tick {
            write!(f, "{:>tick_width$} ", tick)?;
            for ((part, cells), &width) in thread_parts.iter().zip(&cells).zip(&widths) {
                let cell = part
                    .iter()
                    .zip(cells)
                    .find_map(|(inv, cell)| {
                        if inv.call_timestamp == tick {
                            Some(cell.as_str())
                        } else if inv.call_timestamp < tick && tick <= inv.return_timestamp {
                            Some("|")
                        } else {
                            None
                        }
                    })
                    .unwrap_or("");
                write!(f, "| {:<width$} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
