use crate::common::*;
use crate::errors::Fault;

pub struct Stack {
    values: Words,
    capacity: usize,
}

impl Stack {
    pub fn new(capacity: usize) -> Stack {
        Stack {
            values: Vec::with_capacity(capacity),
            capacity: capacity,
        }
    }

    pub fn push(&mut self, value: Word) -> Result<(), Fault> {
        if self.values.len() >= self.capacity {
            return Err(Fault::StackOverflow { capacity: self.capacity });
        }

        self.values.push(value);
        debug!("push value={} sp={:?}", value, self.pointer());
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Word, Fault> {
        let value = self.values.pop().ok_or(Fault::StackUnderflow)?;
        debug!("pop value={} sp={:?}", value, self.pointer());
        Ok(value)
    }

    pub fn peek(&self) -> Result<Word, Fault> {
        self.values.last().cloned().ok_or(Fault::StackUnderflow)
    }

    /// Index of the top element, `None` when empty.
    pub fn pointer(&self) -> Option<usize> {
        self.values.len().checked_sub(1)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> WordsSlice {
        &self.values
    }
}
