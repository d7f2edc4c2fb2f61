use std::env;
use std::fs;
use std::path::Path;

// Expone las variables de .env como env vars de compilación (option_env!)
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contenido) = fs::read_to_string(env_file) {
            for linea in contenido.lines() {
                let linea = linea.trim();
                if linea.is_empty() || linea.starts_with('#') {
                    continue;
                }

                if let Some((clave, valor)) = linea.split_once('=') {
                    let clave = clave.trim();
                    let valor = valor.trim();

                    // Las variables ya definidas en el entorno tienen prioridad
                    if env::var(clave).is_err() {
                        println!("cargo:rustc-env={}={}", clave, valor);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=Sin archivo .env; se usan los defaults compilados.");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
