use crate::{definitions::cpu, error::LoadError};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw big endian instruction stream, without any header
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new<T>(name: &str, data: T) -> Self
    where
        T: Into<Box<[u8]>>,
    {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Builds a rom from instruction words, mostly useful for small hand written programs.
    pub fn from_opcodes(name: &str, opcodes: &[u16]) -> Self {
        let data: Vec<u8> = opcodes.iter().flat_map(|op| op.to_be_bytes()).collect();
        Rom::new(name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Checks that the rom fits into the program area of the memory.
    pub fn validate(&self) -> Result<(), LoadError> {
        validate(&self.data)
    }
}

/// Checks that the program fits between the program start and the end of the memory.
pub fn validate(program: &[u8]) -> Result<(), LoadError> {
    if program.len() > cpu::PROGRAM_MAX_SIZE {
        Err(LoadError::ProgramTooLarge {
            len: program.len(),
            max: cpu::PROGRAM_MAX_SIZE,
        })
    } else {
        Ok(())
    }
}
