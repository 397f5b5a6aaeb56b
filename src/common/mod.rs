use byteorder::LittleEndian;

pub type Word = i64;
pub type Words = Vec<Word>;
pub type WordsSlice<'a> = &'a [Word];

pub type Endian = LittleEndian;

pub type Data = Vec<u8>;
pub type DataSlice<'a> = &'a [u8];
