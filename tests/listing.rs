use gpcp_mirror::domain::Year;
use gpcp_mirror::listing::{data_files_in, year_subdirs_in};

const ACCESS_INDEX: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 3.2 Final//EN">
<html>
 <head>
  <title>Index of /data/global-precipitation-climatology-project-gpcp-daily/access</title>
 </head>
 <body>
<h1>Index of /data/global-precipitation-climatology-project-gpcp-daily/access</h1>
  <table>
   <tr><th><a href="?C=N;O=D">Name</a></th><th><a href="?C=M;O=A">Last modified</a></th></tr>
<tr><td><a href="/data/global-precipitation-climatology-project-gpcp-daily/">Parent Directory</a></td></tr>
<tr><td><a href="1996/">1996/</a></td><td align="right">2022-05-19 12:49  </td></tr>
<tr><td><a href="2004/">2004/</a></td><td align="right">2022-05-19 12:50  </td></tr>
<tr><td><a href="2005/">2005/</a></td><td align="right">2022-05-19 12:50  </td></tr>
</table>
</body></html>
"#;

const YEAR_INDEX: &str = r#"<html><body><table>
<tr><td><a href="/data/global-precipitation-climatology-project-gpcp-daily/access/">Parent Directory</a></td></tr>
<tr><td><a href="gpcp_v01r03_daily_d20050101_c20170530.nc">gpcp_v01r03_daily_d20050101_c20170530.nc</a></td><td>28M</td></tr>
<tr><td><a href="gpcp_v01r03_daily_d20050102_c20170530.nc">gpcp_v01r03_daily_d20050102_c20170530.nc</a></td><td>28M</td></tr>
<tr><td><a href="gpcp_v01r03_daily_d20050102_c20170530.nc.md5">gpcp_v01r03_daily_d20050102_c20170530.nc.md5</a></td></tr>
<tr><td><a href="README.txt">README.txt</a></td></tr>
</table></body></html>
"#;

#[test]
fn lists_only_requested_year() {
    for raw in ["1996", "2004", "2005"] {
        let year: Year = raw.parse().unwrap();
        let subdirs = year_subdirs_in(ACCESS_INDEX, &year);
        assert_eq!(subdirs, vec![format!("{raw}/")]);
    }
}

#[test]
fn unknown_year_lists_nothing() {
    let year: Year = "1970".parse().unwrap();
    assert!(year_subdirs_in(ACCESS_INDEX, &year).is_empty());
}

#[test]
fn lists_only_netcdf_data_files() {
    let files = data_files_in(YEAR_INDEX);
    assert_eq!(files.len(), 2);
    assert!(
        files
            .iter()
            .all(|name| name.starts_with("gpcp_") && name.ends_with(".nc"))
    );
}

#[test]
fn empty_page_lists_nothing() {
    assert!(data_files_in("").is_empty());
    assert!(data_files_in("<html>maintenance</html>").is_empty());
}
