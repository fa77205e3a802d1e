use crate::error::ToolchainError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

mod process;

pub use process::run_with_timeout;

/// The default time an external tool may run before it is killed.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(1000);

/// A shader compiler and reflector pair used to build shader variants.
pub trait Toolchain {
    /// Compile the shader at `source` to SPIR-V at `output` with the given macros defined.
    fn compile(&self, source: &Path, defines: &[&str], output: &Path)
        -> Result<(), ToolchainError>;

    /// Write a JSON reflection report of the SPIR-V module at `spirv` to `output`.
    fn reflect(&self, spirv: &Path, output: &Path) -> Result<(), ToolchainError>;
}

/// Options for the external command line toolchain.
#[derive(Debug, Clone)]
pub struct ToolchainOptions {
    /// The `glslangValidator` compatible compiler executable.
    pub compiler: PathBuf,
    /// The `spirv-cross` compatible reflector executable.
    pub reflector: PathBuf,
    /// How long a single invocation may run before it is killed.
    pub timeout: Duration,
}

impl Default for ToolchainOptions {
    fn default() -> Self {
        ToolchainOptions {
            compiler: PathBuf::from("glslangValidator"),
            reflector: PathBuf::from("spirv-cross"),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }
}

/// A toolchain that runs `glslangValidator` and `spirv-cross` as child processes.
#[derive(Debug, Clone, Default)]
pub struct ExternalToolchain {
    options: ToolchainOptions,
}

impl ExternalToolchain {
    pub fn new(options: ToolchainOptions) -> Self {
        ExternalToolchain { options }
    }

    pub fn options(&self) -> &ToolchainOptions {
        &self.options
    }

    /// The command line that compiles `source` to Vulkan SPIR-V.
    pub fn compile_command(&self, source: &Path, defines: &[&str], output: &Path) -> Command {
        let mut command = Command::new(&self.options.compiler);
        command.arg("-V").arg(source);
        for define in defines {
            command.arg(format!("-D{define}"));
        }
        command.arg("-o").arg(output);
        command
    }

    /// The command line that reflects `spirv` to a JSON report.
    pub fn reflect_command(&self, spirv: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.options.reflector);
        command
            .arg(spirv)
            .arg("--reflect")
            .arg("--output")
            .arg(output);
        command
    }
}

impl Toolchain for ExternalToolchain {
    fn compile(
        &self,
        source: &Path,
        defines: &[&str],
        output: &Path,
    ) -> Result<(), ToolchainError> {
        run_with_timeout(
            self.compile_command(source, defines, output),
            self.options.timeout,
        )
    }

    fn reflect(&self, spirv: &Path, output: &Path) -> Result<(), ToolchainError> {
        run_with_timeout(self.reflect_command(spirv, output), self.options.timeout)
    }
}
