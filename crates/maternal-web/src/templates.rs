use tera::Tera;

pub const INDEX: &str = "index.html";
pub const ABOUT: &str = "about.html";

/// Page templates are compiled into the binary.
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        (INDEX, include_str!("../templates/index.html")),
        (ABOUT, include_str!("../templates/about.html")),
    ])?;
    Ok(tera)
}
