#![allow(dead_code)]

use std::fs;
use std::path::Path;

use hr_agent_app_lib::models::settings::{AppSettings, DataSourceKind};
use hr_agent_app_lib::services::settings_service::{ResolvedSettings, SettingsService};
use serde_json::{json, Value};
use tempfile::TempDir;

pub fn employees_json() -> Value {
    json!([
        {
            "id": 1, "name": "Ana Silva", "position": "Desenvolvedora",
            "department": "Tecnologia", "status": "active",
            "performance": 92, "satisfaction": 85, "productivity": 78,
            "lastActivity": "2024-11-20T10:00:00Z"
        },
        {
            "id": 2, "name": "Bruno Costa", "position": "Designer",
            "department": "Design", "status": "vacation",
            "performance": 75, "satisfaction": 70, "productivity": 80,
            "lastActivity": "2024-11-18T10:00:00Z"
        },
        {
            "id": 3, "name": "Carlos Lima", "position": "Analista de Dados",
            "department": "Tecnologia", "status": "training",
            "performance": 88, "satisfaction": 90, "productivity": 85,
            "lastActivity": "2024-11-19"
        },
        {
            "id": 4, "name": "Diego Rocha", "position": "DevOps",
            "department": "Tecnologia", "status": "at-risk",
            "performance": 68, "satisfaction": 60, "productivity": 70
        },
        {
            "id": 5, "name": "Fernanda Alves", "position": "Gerente",
            "department": "Gestão", "status": "active",
            "performance": 95, "satisfaction": 93, "productivity": 91,
            "lastActivity": "2024-11-21T08:30:00Z"
        }
    ])
}

pub fn recommendations_json() -> Value {
    json!([
        {
            "id": 1, "title": "Programa de Mentoria",
            "description": "Baixa satisfação na equipe de Design",
            "department": "Design", "priority": "high", "type": "retention",
            "impact": "Alto", "analysis": "Satisfação caiu 12% no trimestre",
            "action": "Iniciar mentoria", "timeline": "30 dias",
            "expectedResults": ["Aumento de 15% na satisfação"]
        },
        {
            "id": 2, "title": "Plano de Carreira",
            "description": "Risco de saída em Tecnologia",
            "department": "Tecnologia", "priority": "medium", "type": "development",
            "action": "Revisar trilhas"
        },
        {
            "id": 3, "title": "Treinamento em Liderança",
            "department": "Gestão", "priority": "low"
        },
        {
            "id": 4, "title": "Revisão de Carga",
            "department": "Tecnologia", "priority": "high", "type": "wellbeing"
        }
    ])
}

pub fn charts_json() -> Value {
    json!({
        "performance": {
            "labels": ["Jun", "Jul", "Ago", "Set", "Out", "Nov"],
            "data": [82, 84, 83, 86, 87, 88]
        },
        "departments": {
            "labels": ["Tecnologia", "Design", "Gestão"],
            "data": [86, 79, 91]
        },
        "satisfaction": {
            "labels": ["Jun", "Jul", "Ago", "Set", "Out", "Nov"],
            "data": [85, 86, 84, 87, 88, 89]
        },
        "status": {
            "labels": ["Ativos", "Férias", "Treinamento", "Em Risco"],
            "data": [2, 1, 1, 1]
        }
    })
}

fn write_json(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create data dir");
    fs::write(path, serde_json::to_vec_pretty(value).expect("encode fixture")).expect("write fixture");
}

/// A `public/`-like directory with the three static data files.
pub fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    write_json(dir.path(), "data/employees.json", &employees_json());
    write_json(dir.path(), "data/recommendations.json", &recommendations_json());
    write_json(dir.path(), "data/charts.json", &charts_json());
    dir
}

pub fn settings_for(source: DataSourceKind, base: &str) -> ResolvedSettings {
    let settings = AppSettings {
        source,
        base: base.to_string(),
        http_timeout_secs: 2,
        ..AppSettings::default()
    };
    SettingsService::resolve(settings).expect("valid settings")
}

pub fn static_settings(dir: &TempDir) -> ResolvedSettings {
    settings_for(DataSourceKind::Static, &dir.path().display().to_string())
}

pub fn api_settings(base_url: &str) -> ResolvedSettings {
    settings_for(DataSourceKind::Api, base_url)
}
