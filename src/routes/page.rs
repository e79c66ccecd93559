//! Dashboard pages and the application route table.

use std::sync::OnceLock;

use super::{RouteTable, RouteTableBuilder};

/// Every page the dashboard can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Profile,
    Calendar,
    Blank,
    FormElements,
    BasicTables,
    Alerts,
    Avatars,
    Badges,
    Buttons,
    Images,
    Videos,
    LineChart,
    BarChart,
    /// User list filtered by the `rol` prop
    Usuarios,
    Roles,
    Pacientes,
    Archivos,
    TiposObservacion,
    Admisiones,
    OcrCrudo,
    Observaciones,
    RevisionObservaciones,
    Prediccion,
    Reportes,
    SignIn,
    SignUp,
    NotFound,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Inicio",
            Page::Profile => "Perfil",
            Page::Calendar => "Calendario",
            Page::Blank => "Página en blanco",
            Page::FormElements => "Formularios",
            Page::BasicTables => "Tablas",
            Page::Alerts => "Alertas",
            Page::Avatars => "Avatares",
            Page::Badges => "Insignias",
            Page::Buttons => "Botones",
            Page::Images => "Imágenes",
            Page::Videos => "Videos",
            Page::LineChart => "Gráfico de líneas",
            Page::BarChart => "Gráfico de barras",
            Page::Usuarios => "Usuarios",
            Page::Roles => "Roles",
            Page::Pacientes => "Pacientes",
            Page::Archivos => "Archivos",
            Page::TiposObservacion => "Tipos de observación",
            Page::Admisiones => "Admisiones",
            Page::OcrCrudo => "OCR crudo",
            Page::Observaciones => "Observaciones",
            Page::RevisionObservaciones => "Revisión de observaciones",
            Page::Prediccion => "Predicción",
            Page::Reportes => "Reportes",
            Page::SignIn => "Iniciar sesión",
            Page::SignUp => "Registrarse",
            Page::NotFound => "Página no encontrada",
        }
    }

    /// Backend collection a CRUD page lists from
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            Page::Usuarios => Some("/usuarios/"),
            Page::Roles => Some("/roles/"),
            Page::Pacientes => Some("/pacientes/"),
            Page::Archivos => Some("/archivos/"),
            Page::TiposObservacion => Some("/tipos-observacion/"),
            Page::Admisiones => Some("/admisiones/"),
            Page::OcrCrudo => Some("/ocr-crudo/"),
            Page::Observaciones => Some("/observaciones/"),
            Page::RevisionObservaciones => Some("/revision_observaciones/"),
            _ => None,
        }
    }
}

/// Build the dashboard's route table
pub fn build_app_routes() -> RouteTableBuilder {
    RouteTable::builder()
        .authenticated("/", Page::Home)
        // Others
        .authenticated("/profile", Page::Profile)
        .authenticated("/calendar", Page::Calendar)
        .authenticated("/blank", Page::Blank)
        // Forms and tables
        .authenticated("/form-elements", Page::FormElements)
        .authenticated("/basic-tables", Page::BasicTables)
        // UI elements
        .authenticated("/alerts", Page::Alerts)
        .authenticated("/avatars", Page::Avatars)
        .authenticated("/badge", Page::Badges)
        .authenticated("/buttons", Page::Buttons)
        .authenticated("/images", Page::Images)
        .authenticated("/videos", Page::Videos)
        // Charts
        .authenticated("/line-chart", Page::LineChart)
        .authenticated("/bar-chart", Page::BarChart)
        // Clinical records
        .authenticated_with("/usuarios/analistas", Page::Usuarios, &[("rol", "analista")])
        .authenticated_with("/usuarios/doctores", Page::Usuarios, &[("rol", "doctor")])
        .authenticated_with("/usuarios/ti", Page::Usuarios, &[("rol", "TI")])
        .authenticated("/roles", Page::Roles)
        .authenticated("/pacientes", Page::Pacientes)
        .authenticated("/archivos", Page::Archivos)
        .authenticated("/tipos-observacion", Page::TiposObservacion)
        .authenticated("/admisiones", Page::Admisiones)
        .authenticated("/ocr-crudo", Page::OcrCrudo)
        .authenticated("/observaciones", Page::Observaciones)
        .authenticated("/revision-observaciones", Page::RevisionObservaciones)
        .authenticated("/prediccion", Page::Prediccion)
        .authenticated("/reportes", Page::Reportes)
        // Auth pages
        .standalone("/signin", Page::SignIn)
        .standalone("/signup", Page::SignUp)
}

/// The dashboard's route table, built once
pub fn app_routes() -> &'static RouteTable {
    static TABLE: OnceLock<RouteTable> = OnceLock::new();
    TABLE.get_or_init(|| match build_app_routes().build(Page::NotFound) {
        Ok(table) => table,
        Err(e) => unreachable!("static route table is invalid: {}", e),
    })
}
