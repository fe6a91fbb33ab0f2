


#[cfg(test)]
mod to_do_list_show_tests;

#[cfg(test)]
mod to_do_list_update_tests;

#[cfg(test)]
mod to_do_list_delete_tests;

#[cfg(test)]
mod to_do_list_isolation_tests;

#[cfg(test)]
mod auth_tests;


#[cfg(test)]
mod health_tests;
