// Stream Decompressor: mirror ordering, eager open, close and corrupt input.

#[cfg(test)]
mod tests {
    use std::io::{self, Read};
    use std::sync::Mutex;

    use codec_pipeline::compression::{
        compress, decompress, BoxedDecoder, DecodeLayer, DecompressionRegistry, PipelineError,
        StreamDecompressor,
    };

    static FINALIZED: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    /// Pass-through reader that records when it is finalized.
    struct Recorder<'a> {
        inner: BoxedDecoder<'a>,
        tag: &'static str,
    }

    impl Read for Recorder<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl DecodeLayer for Recorder<'_> {
        fn has_finalize(&self) -> bool {
            true
        }

        fn finalize(&mut self) -> io::Result<()> {
            if self.tag == "bad" {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "unread trailer"));
            }
            FINALIZED.lock().unwrap().push(self.tag);
            Ok(())
        }

        fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
            Some(self.inner.as_mut())
        }
    }

    fn recorder<'a>(inner: BoxedDecoder<'a>, tag: &'static str) -> io::Result<BoxedDecoder<'a>> {
        Ok(Box::new(Recorder { inner, tag }))
    }

    fn recording_registry() -> DecompressionRegistry {
        let mut registry = DecompressionRegistry::builtin().clone();
        registry.register("rec-x", |inner| recorder(inner, "x"));
        registry.register("rec-y", |inner| recorder(inner, "y"));
        registry.register("rec-z", |inner| recorder(inner, "z"));
        registry.register("rec-bad", |inner| recorder(inner, "bad"));
        registry
    }

    // ------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------

    #[test]
    fn test_uses_compressor_order() {
        let data = b"decompressors take the order the compressor was given".repeat(4);
        let order = ["gzip", "zstd"];
        let encoded = compress(&data, None, &order).unwrap();

        let mut decompressor = StreamDecompressor::new(encoded.as_slice(), order);
        let mut out = Vec::new();
        decompressor.read_to_end(&mut out).unwrap();
        assert_eq!(decompressor.layer_names().unwrap(), vec!["gzip", "zstd"]);
        decompressor.close().unwrap();
        assert_eq!(out, data);

        // Reversed order is a different stream entirely.
        assert!(decompress(&encoded, None, &["zstd", "gzip"]).is_err());
    }

    #[test]
    fn test_close_finalizes_last_constructed_first() {
        FINALIZED.lock().unwrap().clear();
        let registry = recording_registry();
        let mut decompressor =
            StreamDecompressor::with_registry(&b"abc"[..], &registry, ["rec-x", "", "rec-y", "rec-z"]);
        let mut out = String::new();
        decompressor.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");

        decompressor.close().unwrap();
        decompressor.close().unwrap();
        assert_eq!(*FINALIZED.lock().unwrap(), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_close_stops_at_first_failure() {
        let registry = recording_registry();
        let mut decompressor =
            StreamDecompressor::open(&b"abc"[..], Some(&registry), ["identity", "rec-bad", "identity"]).unwrap();
        let mut out = Vec::new();
        decompressor.read_to_end(&mut out).unwrap();

        let err = decompressor.close().unwrap_err();
        assert!(matches!(err, PipelineError::Finalize { index: 1, .. }));
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "layer[1:rec-bad] finalize failed: unread trailer");
    }

    // ------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------

    #[test]
    fn test_empty_order_is_identity() {
        let data = b"foo bar baz\n\n";
        let empty: [&str; 0] = [];
        assert_eq!(decompress(data, None, &empty).unwrap(), data);
        assert_eq!(decompress(data, None, &["", ""]).unwrap(), data);
    }

    #[test]
    fn test_lazy_until_first_read() {
        let mut decompressor = StreamDecompressor::new(&b""[..], ["bogus"]);
        assert_eq!(decompressor.layer_count(), None);

        let mut buf = [0u8; 8];
        let err = decompressor.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(err.to_string(), "bogus is not supported");

        // Close after a failed init has nothing to release.
        decompressor.close().unwrap();
    }

    #[test]
    fn test_open_reports_unknown_name() {
        let result = StreamDecompressor::open(&b""[..], None, ["zstd", "lz77"]);
        match result {
            Err(PipelineError::Unsupported { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "lz77");
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("open should fail"),
        }
    }

    #[test]
    fn test_close_without_reads_is_noop() {
        let mut decompressor = StreamDecompressor::new(&b"never read"[..], ["gzip"]);
        decompressor.close().unwrap();
        assert_eq!(decompressor.layer_count(), None);
    }

    #[test]
    fn test_read_after_close_fails() {
        let encoded = compress(b"short", None, &["zlib"]).unwrap();
        let mut decompressor = StreamDecompressor::new(encoded.as_slice(), ["zlib"]);
        let mut out = Vec::new();
        decompressor.read_to_end(&mut out).unwrap();
        decompressor.close().unwrap();

        let err = decompressor.read(&mut [0u8; 4]).unwrap_err();
        assert!(matches!(PipelineError::from(err), PipelineError::Closed));
    }

    // ------------------------------------------------------------
    // Corrupt input
    // ------------------------------------------------------------

    #[test]
    fn test_corrupt_input_is_an_io_error() {
        for name in ["gzip", "zlib", "zstd"] {
            let err = decompress(b"definitely not an encoded stream", None, &[name]).unwrap_err();
            assert!(
                matches!(err, PipelineError::Io(_)),
                "{name}: expected an i/o error, got {err:?}"
            );
        }
    }

    #[test]
    fn test_truncated_stream_is_rejected() {
        let data = b"truncated streams must not decode silently".repeat(16);
        for name in ["gzip", "zstd"] {
            let encoded = compress(&data, None, &[name]).unwrap();
            let cut = &encoded[..encoded.len() / 2];
            assert!(decompress(cut, None, &[name]).is_err(), "{name} accepted a truncated stream");
        }
    }

    #[test]
    fn test_snapshot_counts_both_sides() {
        let data = vec![7u8; 4096];
        let encoded = compress(&data, None, &["deflate"]).unwrap();
        let mut decompressor = StreamDecompressor::new(encoded.as_slice(), ["deflate"]);
        let mut out = Vec::new();
        decompressor.read_to_end(&mut out).unwrap();

        let snapshot = decompressor.snapshot();
        assert_eq!(snapshot.bytes_plaintext, data.len() as u64);
        assert_eq!(snapshot.bytes_encoded, encoded.len() as u64);
        assert_eq!(snapshot.layers, 1);
    }
}
