// Registry lookups, custom registries and configured codec parameters.

#[cfg(test)]
mod tests {
    use std::io;

    use codec_pipeline::compression::codecs::{identity_reader, identity_writer};
    use codec_pipeline::compression::{
        compress, decompress, encoding_names, BoxedEncoder, CodecConfig, CompressionRegistry,
        ConfigError, DecompressionRegistry, PipelineError,
    };

    fn broken_writer<'a>(_inner: BoxedEncoder<'a>) -> io::Result<BoxedEncoder<'a>> {
        Err(io::Error::new(io::ErrorKind::InvalidInput, "level out of range"))
    }

    // ------------------------------------------------------------
    // Built-in registries
    // ------------------------------------------------------------

    #[test]
    fn test_builtin_registries_are_symmetric() {
        let enc = CompressionRegistry::builtin();
        let dec = DecompressionRegistry::builtin();
        assert_eq!(enc.names(), dec.names());
        for name in encoding_names::BUILTIN {
            assert!(enc.contains(name), "compression registry lacks {name:?}");
            assert!(dec.contains(name), "decompression registry lacks {name:?}");
        }
        assert_eq!(enc.len(), encoding_names::BUILTIN.len());
    }

    #[test]
    fn test_lookup_unknown_name_reports_not_supported() {
        let err = CompressionRegistry::builtin().lookup(3, "bogus").err().unwrap();
        assert_eq!(err.to_string(), "bogus is not supported");
        assert_eq!(err.layer_index(), Some(3));
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let err = compress(b"hello", None, &["GZIP"]).unwrap_err();
        assert!(matches!(err, PipelineError::Unsupported { ref name, .. } if name == "GZIP"));
    }

    // ------------------------------------------------------------
    // Custom registries
    // ------------------------------------------------------------

    #[test]
    fn test_custom_registry_alias() {
        let mut enc = CompressionRegistry::empty();
        let mut dec = DecompressionRegistry::empty();
        assert!(enc.is_empty());
        enc.register("x-plain", identity_writer);
        dec.register("x-plain", identity_reader);

        let data = b"custom registries only know their own names";
        let out = compress(data, Some(&enc), &["x-plain"]).unwrap();
        assert_eq!(out, data);
        assert_eq!(decompress(&out, Some(&dec), &["x-plain"]).unwrap(), data);

        // Built-in names are not visible through a custom registry.
        let err = compress(data, Some(&enc), &["gzip"]).unwrap_err();
        assert_eq!(err.to_string(), "gzip is not supported");
    }

    #[test]
    fn test_register_replaces_and_remove_drops() {
        let mut enc = CompressionRegistry::builtin().clone();
        assert!(enc.register("gzip", identity_writer).is_some());
        // "gzip" is now a pass-through.
        assert_eq!(compress(b"abc", Some(&enc), &["gzip"]).unwrap(), b"abc");

        assert!(enc.remove("gzip").is_some());
        assert!(!enc.contains("gzip"));
        assert!(enc.remove("gzip").is_none());
    }

    #[test]
    fn test_factory_error_is_a_construction_error() {
        let mut enc = CompressionRegistry::builtin().clone();
        enc.register("broken", broken_writer);

        let err = compress(b"abc", Some(&enc), &["gzip", "", "broken"]).unwrap_err();
        match &err {
            PipelineError::Construction { index, name, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(name, "broken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("layer[1:broken] construction failed"));
    }

    // ------------------------------------------------------------
    // Configured registries
    // ------------------------------------------------------------

    #[test]
    fn test_config_defaults_and_json() {
        let config = CodecConfig::from_json(r#"{ "flate_level": 9, "zstd_level": 19 }"#).unwrap();
        assert_eq!(config.flate_level, 9);
        assert_eq!(config.zstd_level, 19);
        assert_eq!(config.brotli_quality, CodecConfig::default().brotli_quality);
        config.validate().unwrap();

        assert!(matches!(CodecConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_validation() {
        let config = CodecConfig { flate_level: 12, ..CodecConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::LevelOutOfRange { codec: "flate", .. })));

        let config = CodecConfig { brotli_lgwin: 30, ..CodecConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::WindowOutOfRange { lgwin: 30, .. })));

        let config = CodecConfig { buffer_size: 16, ..CodecConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::BufferOutOfRange { size: 16, .. })));
    }

    #[test]
    fn test_zstd_fast_levels_are_accepted() {
        let config = CodecConfig { zstd_level: -5, ..CodecConfig::default() };
        config.validate().unwrap();

        let enc = CompressionRegistry::from_config(&config);
        let data = b"negative zstd levels select the fast strategies".repeat(10);
        let out = compress(&data, Some(&enc), &["zstd"]).unwrap();
        assert_eq!(decompress(&out, None, &["zstd"]).unwrap(), data);

        let config = CodecConfig { zstd_level: i32::MIN, ..CodecConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LevelOutOfRange { codec: "zstd", min, .. }) if min < 0
        ));
    }

    #[test]
    fn test_configured_registry_rejects_bad_level_per_layer() {
        let config = CodecConfig { flate_level: 12, ..CodecConfig::default() };
        let enc = CompressionRegistry::from_config(&config);

        // Codecs that do not use the bad parameter still work.
        let data = b"zstd and br ignore the flate level";
        let out = compress(data, Some(&enc), &["zstd", "br"]).unwrap();
        assert_eq!(decompress(&out, None, &["zstd", "br"]).unwrap(), data);

        let err = compress(data, Some(&enc), &["identity", "gzip"]).unwrap_err();
        assert!(matches!(err, PipelineError::Construction { index: 1, .. }));
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_configured_registry_roundtrip() {
        let config = CodecConfig {
            flate_level: 1,
            brotli_quality: 11,
            brotli_lgwin: 16,
            zstd_level: 10,
            buffer_size: 1024,
        };
        config.validate().unwrap();
        let enc = CompressionRegistry::from_config(&config);
        let dec = DecompressionRegistry::from_config(&config);

        let data = b"configured codecs still produce standard framing ".repeat(30);
        let order = ["gzip", "br", "zstd", "compress"];
        let out = compress(&data, Some(&enc), &order).unwrap();
        // Standard framing: the default decoders read configured output too.
        assert_eq!(decompress(&out, None, &order).unwrap(), data);
        assert_eq!(decompress(&out, Some(&dec), &order).unwrap(), data);
    }
}
