/// Check whether `buffer` looks like UTF-8 text.
///
/// Every byte above 127 must start a well-formed 2, 3 or 4 byte sequence.
/// A buffer without any multi-byte sequence is plain ASCII and could be any
/// ANSI codepage, so it is not reported as UTF-8 either. The last three bytes
/// are not inspected, which keeps a sequence cut by a bounded read from
/// failing the whole scan.
pub fn is_valid_utf8(buffer: &[u8]) -> bool {
    let mut multi_byte_count = 0usize;
    let mut i = 0usize;

    while i + 3 < buffer.len() {
        let lead = buffer[i];
        if lead > 127 {
            let continuation = |offset: usize| is_continuation(buffer[i + offset]);
            let sequence_length = match lead {
                194..=223 if continuation(1) => 2,
                224..=239 if continuation(1) && continuation(2) => 3,
                240..=244 if continuation(1) && continuation(2) && continuation(3) => 4,
                _ => return false,
            };
            multi_byte_count += 1;
            i += sequence_length - 1;
        }
        i += 1;
    }

    multi_byte_count > 0
}

fn is_continuation(byte: u8) -> bool {
    (128..=191).contains(&byte)
}
