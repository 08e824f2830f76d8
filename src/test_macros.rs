#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! reader_from_relative_file {
    ($f : expr) => {{
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let path = base.join($f);
        let f = File::open(path).unwrap();
        BufReader::new(f)
    }};
}

#[macro_export]
macro_rules! reader_from_bytes {
    ($b : expr) => {{
        let buffer: &[u8] = $b.as_bytes();
        BufReader::new(buffer)
    }};
}
