use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Zh => f.write_str("zh"),
        }
    }
}

/// Fixed page text for one locale.
#[derive(Debug)]
pub struct Labels {
    pub lang: &'static str,
    pub title: &'static str,
    pub add_heading: &'static str,
    pub name_field: &'static str,
    pub age_field: &'static str,
    pub submit: &'static str,
    pub list_heading: &'static str,
    /// 列表項目中 "<name> - Age: <age>" 的分隔字串
    pub age_label: &'static str,
    pub empty: &'static str,
    pub connection_failed: &'static str,
}

impl Labels {
    /// The single line that replaces the whole page when the database is unreachable.
    pub fn fatal_connection_line(&self, driver_message: &str) -> String {
        format!("{}{}", self.connection_failed, driver_message)
    }
}

static EN: Labels = Labels {
    lang: "en",
    title: "Student Management System",
    add_heading: "Add Student",
    name_field: "Name: ",
    age_field: "Age: ",
    submit: "Add Student",
    list_heading: "Student List",
    age_label: " - Age: ",
    empty: "No students yet",
    connection_failed: "Database connection failed: ",
};

static ZH: Labels = Labels {
    lang: "zh",
    title: "学生管理系统",
    add_heading: "添加学生",
    name_field: "姓名：",
    age_field: "年龄：",
    submit: "添加学生",
    list_heading: "学生列表",
    age_label: " - 年龄：",
    empty: "暂无学生信息。",
    connection_failed: "数据库连接失败：",
};
