use std::io::{ErrorKind, Read};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("short read: wanted {wanted} bytes, got {got}")]
    Short { wanted: usize, got: usize },
}

/// Reads until `buf` is full or the reader runs dry, returning whether the
/// end was hit and how many bytes landed in `buf`.
pub fn fill_buf<R: Read + ?Sized>(data: &mut R, buf: &mut [u8]) -> std::io::Result<(bool, usize)> {
    let mut filled = 0;

    while filled < buf.len() {
        match data.read(&mut buf[filled..]) {
            Ok(0) => return Ok((true, filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => (),
            Err(e) => return Err(e),
        }
    }
    Ok((false, filled))
}

// Fixed size records are all or nothing, a partial fill is an error
pub fn read_record<R: Read + ?Sized>(data: &mut R, buf: &mut [u8]) -> Result<(), BufError> {
    match fill_buf(data, buf)? {
        (_, len) if len == buf.len() => Ok(()),
        (_, len) => Err(BufError::Short {
            wanted: buf.len(),
            got: len,
        }),
    }
}

// Read up to `limit` bytes, fewer only if the reader runs dry
pub fn read_prefix<R: Read + ?Sized>(data: &mut R, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0; limit];
    let (_, len) = fill_buf(data, &mut buf)?;
    buf.truncate(len);
    Ok(buf)
}


#[cfg(test)]
mod test_read_record {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn exact_record() {
        let mut in_buf = Cursor::new(vec![1, 2, 3, 4, 5]);
        let mut buf: [u8; 4] = [0; 4];

        read_record(&mut in_buf, &mut buf).unwrap();
        assert_eq!(&buf, &[1, 2, 3, 4]);
        assert_eq!(in_buf.position(), 4);
    }

    #[test]
    fn short_record() {
        let mut in_buf = Cursor::new(vec![1, 2, 3]);
        let mut buf: [u8; 8] = [0; 8];

        match read_record(&mut in_buf, &mut buf) {
            Err(BufError::Short { wanted, got }) => {
                assert_eq!(wanted, 8);
                assert_eq!(got, 3);
            }
            x => panic!("Expected a short read, got: {:?}", x),
        }
    }

    #[test]
    fn prefix_of_long_stream() {
        let mut in_buf = Cursor::new((0..100u8).collect::<Vec<u8>>());

        assert_eq!(read_prefix(&mut in_buf, 4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(read_prefix(&mut in_buf, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn prefix_of_short_stream() {
        let mut in_buf = Cursor::new(vec![9, 8]);

        assert_eq!(read_prefix(&mut in_buf, 16).unwrap(), vec![9, 8]);
    }
}
