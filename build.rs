use std::process::Command;

fn main() {
    // Only rebuild CSS when template or CSS files change
    println!("cargo:rerun-if-changed=assets/css/input.css");
    println!("cargo:rerun-if-changed=templates/");

    // Try to run Tailwind CSS standalone CLI
    let status = Command::new("tailwindcss")
        .args([
            "-i",
            "assets/css/input.css",
            "-o",
            "assets/css/output.css",
            "--minify",
        ])
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Tailwind CSS compiled successfully");
        }
        _ => {
            // Tailwind CLI not available — create a minimal fallback CSS
            println!("cargo:warning=Tailwind CLI not found, using fallback CSS");
            let fallback = r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, sans-serif; line-height: 1.6; color: #1c1917; background: #fafaf9; -webkit-font-smoothing: antialiased; }
.mx-auto { margin-left: auto; margin-right: auto; }
.max-w-3xl { max-width: 48rem; }
.max-w-md { max-width: 28rem; }
.px-4 { padding-left: 1rem; padding-right: 1rem; }
.py-3 { padding-top: 0.75rem; padding-bottom: 0.75rem; }
.py-8 { padding-top: 2rem; padding-bottom: 2rem; }
.mb-2 { margin-bottom: 0.5rem; }
.mb-4 { margin-bottom: 1rem; }
.mb-8 { margin-bottom: 2rem; }
.mt-1 { margin-top: 0.25rem; }
.mt-4 { margin-top: 1rem; }
.flex { display: flex; }
.items-center { align-items: center; }
.justify-between { justify-content: space-between; }
.gap-3 { gap: 0.75rem; }
.gap-4 { gap: 1rem; }
.text-sm { font-size: 0.875rem; }
.text-lg { font-size: 1.125rem; }
.text-xl { font-size: 1.25rem; }
.text-2xl { font-size: 1.5rem; }
.font-medium { font-weight: 500; }
.font-semibold { font-weight: 600; }
.font-bold { font-weight: 700; }
.text-stone-500 { color: #78716c; }
.text-stone-600 { color: #57534e; }
.text-stone-900 { color: #1c1917; }
.text-red-700 { color: #b91c1c; }
.text-green-700 { color: #15803d; }
.bg-white { background-color: #fff; }
.bg-red-50 { background-color: #fef2f2; }
.bg-green-50 { background-color: #f0fdf4; }
.border { border: 1px solid #d6d3d1; }
.border-b { border-bottom: 1px solid #e7e5e4; }
.rounded-lg { border-radius: 0.5rem; }
.rounded-full { border-radius: 9999px; }
.whitespace-pre-wrap { white-space: pre-wrap; }
.w-16 { width: 4rem; }
.h-16 { height: 4rem; }
.w-full { width: 100%; }
.p-2 { padding: 0.5rem; }
.p-3 { padding: 0.75rem; }
a { color: inherit; text-decoration: none; }
a:hover { opacity: 0.8; }
input, textarea, select { width: 100%; padding: 0.5rem; border: 1px solid #d6d3d1; border-radius: 0.5rem; font: inherit; }
label { display: block; font-size: 0.875rem; font-weight: 500; margin-bottom: 0.25rem; }
.btn { display: inline-flex; align-items: center; justify-content: center; padding: 0.5rem 1rem; border-radius: 0.5rem; font-size: 0.875rem; font-weight: 500; cursor: pointer; text-decoration: none; border: none; }
.btn-primary { background: #1c1917; color: #fff; }
.btn-primary:hover { background: #44403c; }
.btn-danger { background: #b91c1c; color: #fff; }
.card { background: #fff; border-radius: 0.75rem; border: 1px solid #e7e5e4; padding: 1.5rem; box-shadow: 0 1px 2px 0 rgb(0 0 0 / 0.05); margin-bottom: 1rem; }
.notice { border-radius: 0.5rem; padding: 0.75rem; margin-bottom: 1rem; }
"#;
            std::fs::create_dir_all("assets/css").ok();
            std::fs::write("assets/css/output.css", fallback).ok();
        }
    }
}
