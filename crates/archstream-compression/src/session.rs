//! Public entry points: compressor sessions and the read loop
//!
//! Writing goes through a [`CompressorSession`]: allocate one, call
//! [`write`](CompressorSession::write) as often as needed, then
//! [`end`](CompressorSession::end) it to flush the codec. Reading is a single
//! call to [`read_data`], which owns the whole decode loop.

use crate::capability::Capabilities;
#[cfg(feature = "zlib")]
use crate::deflate::StreamCompressor;
#[cfg(feature = "zlib")]
use crate::inflate::StreamDecompressor;
use crate::passthrough::{read_passthrough, PassthroughWriter};
use crate::stats::StreamStats;
#[cfg(feature = "zlib")]
use crate::zlib::{ZlibDecoder, ZlibEncoder};
use archstream_types::{
    ByteSink, ByteSource, CompressionAlgorithm, CompressionConfig, Error, ErrorContext, Result,
    StreamOptions,
};
use std::io::Write;
use tracing::debug;

/// Per-algorithm write engine
enum WriteEngine {
    Passthrough(PassthroughWriter),
    #[cfg(feature = "zlib")]
    Zlib(StreamCompressor<ZlibEncoder>),
}

impl WriteEngine {
    fn create(
        config: &CompressionConfig,
        options: &StreamOptions,
        ctx: &ErrorContext,
    ) -> Result<Self> {
        match config.algorithm() {
            CompressionAlgorithm::None => Ok(Self::Passthrough(PassthroughWriter::new())),
            CompressionAlgorithm::Zlib => Self::zlib(config, options, ctx),
        }
    }

    #[cfg(feature = "zlib")]
    fn zlib(
        config: &CompressionConfig,
        options: &StreamOptions,
        ctx: &ErrorContext,
    ) -> Result<Self> {
        let encoder = ZlibEncoder::new(config.level(), ctx)?;
        let compressor = StreamCompressor::new(encoder, options.output_capacity, ctx.clone())?;
        Ok(Self::Zlib(compressor))
    }

    #[cfg(not(feature = "zlib"))]
    fn zlib(_: &CompressionConfig, _: &StreamOptions, ctx: &ErrorContext) -> Result<Self> {
        Err(ctx.unsupported_codec(CompressionAlgorithm::Zlib.name()))
    }

    fn stats(&self) -> &StreamStats {
        match self {
            Self::Passthrough(writer) => writer.stats(),
            #[cfg(feature = "zlib")]
            Self::Zlib(compressor) => compressor.stats(),
        }
    }

    #[cfg_attr(not(feature = "zlib"), allow(unused_variables))]
    fn finish<S: ByteSink + ?Sized>(self, sink: &mut S) -> Result<StreamStats> {
        match self {
            Self::Passthrough(writer) => Ok(writer.finish()),
            #[cfg(feature = "zlib")]
            Self::Zlib(compressor) => compressor.finish(sink),
        }
    }
}

/// Write-side compression session bound to one sink
///
/// Any error poisons the session: later writes and `end` return the same
/// error without touching the sink again.
#[must_use = "a compressor session must be ended to flush buffered output"]
pub struct CompressorSession<S: ByteSink> {
    engine: WriteEngine,
    algorithm: CompressionAlgorithm,
    sink: S,
    ctx: ErrorContext,
    failure: Option<Error>,
}

impl<S: ByteSink> CompressorSession<S> {
    /// Allocate a session from a numeric compression code
    ///
    /// Uses default buffer sizes, the default diagnostic context and the codecs
    /// compiled into this build.
    pub fn allocate(code: i32, sink: S) -> Result<Self> {
        let ctx = ErrorContext::default();
        let config = CompressionConfig::parse(code, &ctx)?;
        Self::with_options(
            config,
            StreamOptions::default(),
            Capabilities::detect(),
            ctx,
            sink,
        )
    }

    /// Allocate a session with explicit settings
    ///
    /// The capability check runs before any buffer or codec state exists.
    pub fn with_options(
        config: CompressionConfig,
        options: StreamOptions,
        capabilities: Capabilities,
        ctx: ErrorContext,
        sink: S,
    ) -> Result<Self> {
        capabilities.ensure(config.algorithm(), &ctx)?;
        let engine = WriteEngine::create(&config, &options, &ctx)?;

        debug!(
            "Allocated {} compressor (code {}, {} byte output buffer)",
            config.algorithm(),
            config.code(),
            options.output_capacity.get()
        );

        Ok(Self {
            engine,
            algorithm: config.algorithm(),
            sink,
            ctx,
            failure: None,
        })
    }

    /// Compress and write `data`
    ///
    /// Returns `data.len()` on success; there is no partial success.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let result = match &mut self.engine {
            WriteEngine::Passthrough(writer) => writer.write(data, &mut self.sink, &self.ctx),
            #[cfg(feature = "zlib")]
            WriteEngine::Zlib(compressor) => compressor.write(data, &mut self.sink),
        };
        if let Err(error) = &result {
            self.failure = Some(error.clone());
        }
        result
    }

    /// Flush the codec, release its state and hand the sink back
    pub fn end(self) -> Result<S> {
        self.finish().map(|(sink, _)| sink)
    }

    /// Like [`end`](Self::end), also returning the session statistics
    pub fn finish(self) -> Result<(S, StreamStats)> {
        let Self {
            engine,
            algorithm,
            mut sink,
            failure,
            ..
        } = self;

        if let Some(error) = failure {
            return Err(error);
        }

        let stats = engine.finish(&mut sink)?;

        debug!(
            "Ended {} compressor: {} bytes in, {} bytes out in {} chunks",
            algorithm, stats.bytes_in, stats.bytes_out, stats.chunks
        );
        Ok((sink, stats))
    }

    /// Algorithm this session compresses with
    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Statistics so far; the codec trailer is only counted after `finish`
    pub fn stats(&self) -> &StreamStats {
        self.engine.stats()
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Read and decode a whole stream from `source` into `consumer`
///
/// Uses default buffer sizes, the default diagnostic context and the codecs
/// compiled into this build.
pub fn read_data<R, W>(code: i32, source: &mut R, consumer: &mut W) -> Result<StreamStats>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let ctx = ErrorContext::default();
    let config = CompressionConfig::parse(code, &ctx)?;
    read_data_with(
        &config,
        &StreamOptions::default(),
        Capabilities::detect(),
        &ctx,
        source,
        consumer,
    )
}

/// Read and decode a whole stream with explicit settings
pub fn read_data_with<R, W>(
    config: &CompressionConfig,
    options: &StreamOptions,
    capabilities: Capabilities,
    ctx: &ErrorContext,
    source: &mut R,
    consumer: &mut W,
) -> Result<StreamStats>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    capabilities.ensure(config.algorithm(), ctx)?;

    let stats = match config.algorithm() {
        CompressionAlgorithm::None => read_passthrough(source, consumer, options, ctx)?,
        CompressionAlgorithm::Zlib => read_zlib(options, ctx, source, consumer)?,
    };

    debug!(
        "Read {} stream: {} bytes in, {} bytes out",
        config.algorithm(),
        stats.bytes_in,
        stats.bytes_out
    );
    Ok(stats)
}

#[cfg(feature = "zlib")]
fn read_zlib<R, W>(
    options: &StreamOptions,
    ctx: &ErrorContext,
    source: &mut R,
    consumer: &mut W,
) -> Result<StreamStats>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    StreamDecompressor::new(ZlibDecoder::new(), *options, ctx.clone()).run(source, consumer)
}

#[cfg(not(feature = "zlib"))]
fn read_zlib<R, W>(
    _: &StreamOptions,
    ctx: &ErrorContext,
    _: &mut R,
    _: &mut W,
) -> Result<StreamStats>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    Err(ctx.unsupported_codec(CompressionAlgorithm::Zlib.name()))
}
