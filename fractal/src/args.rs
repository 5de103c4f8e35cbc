use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// Vertex shader source file
    #[arg(long, default_value = "shaders/vertex.shader")]
    pub vertex: PathBuf,
    /// Fragment shader source file
    #[arg(long, default_value = "shaders/fragment.shader")]
    pub fragment: PathBuf,
    /// PNG image mapped onto the quad
    #[arg(short, long)]
    pub texture: Option<PathBuf>,
}
