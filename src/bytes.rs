use std::io::{Read, Result as IoResult, Write};

/// Serialization into a writer, little-endian limb order, internal
/// (regular, non-Montgomery) representation for field elements.
pub trait ToBytes {
    fn write<W: Write>(&self, writer: W) -> IoResult<()>;
}

/// Deserialization from a reader; the inverse of [`ToBytes`].
pub trait FromBytes: Sized {
    fn read<R: Read>(reader: R) -> IoResult<Self>;
}

impl ToBytes for u64 {
    #[inline]
    fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl FromBytes for u64 {
    #[inline]
    fn read<R: Read>(mut reader: R) -> IoResult<Self> {
        let mut bytes = [0u8; 8];
        reader.read_exact(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }
}
